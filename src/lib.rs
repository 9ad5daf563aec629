//! Fnugg ski-resort sensors
//!
//! Polls the Fnugg API for one resort's conditions and flattens the payload
//! into named, typed readings for a home automation host.
//!
//! # Features
//!
//! - Resort directory listing for setup
//! - Weather, snow, lift and slope readings with derived percentages
//! - Per-lift status readings
//! - Throttled refresh with stale-but-available readings on failure
//! - Unit, device class and state class metadata per reading

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;

// Re-export main types for convenience
pub use client::FnuggClient;
pub use config::{FnuggConfig, ResortEntry};
pub use error::{FnuggError, Result};
pub use services::{
    ReadingRegistry, ReadingSet, ReadingValue, RefreshOutcome, ResortDataFetcher,
    ResortDirectory, ResortRef, ResortSensor,
};
