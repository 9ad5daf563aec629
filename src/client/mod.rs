//! HTTP access to the Fnugg API

pub mod http_client;

pub use http_client::{ApiResponse, FnuggClient};
