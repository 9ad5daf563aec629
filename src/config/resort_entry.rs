//! Persisted per-resort configuration entry
//!
//! The host stores one of these when an operator picks a resort during setup
//! and hands it back when the integration starts. The adapter never writes it.

use crate::error::{FnuggError, Result};
use crate::services::resort_directory::ResortRef;
use serde::{Deserialize, Serialize};

/// Configuration entry for one monitored resort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortEntry {
    /// Upstream resort identifier
    pub resort_id: String,

    /// Display name captured at setup time
    pub name: String,
}

impl ResortEntry {
    pub fn new<I: Into<String>, N: Into<String>>(resort_id: I, name: N) -> Self {
        Self {
            resort_id: resort_id.into(),
            name: name.into(),
        }
    }

    /// Build the entry for the resort an operator picked from a directory listing.
    ///
    /// Falls back to the identifier as display name when the listing does not
    /// contain it.
    pub fn from_selection(resorts: &[ResortRef], resort_id: &str) -> Result<Self> {
        let resort_id = resort_id.trim();
        if resort_id.is_empty() {
            return Err(FnuggError::invalid_input("No resort selected"));
        }

        let name = resorts
            .iter()
            .find(|resort| resort.id == resort_id)
            .map_or_else(|| resort_id.to_string(), |resort| resort.name.clone());

        Ok(Self::new(resort_id, name))
    }

    /// Unique identifier of the entry; one entry per resort
    pub fn unique_id(&self) -> &str {
        &self.resort_id
    }

    pub fn validate(&self) -> Result<()> {
        let resort_id = self.resort_id.trim();
        if resort_id.is_empty() {
            return Err(FnuggError::invalid_input("Resort id must not be empty"));
        }
        if matches!(resort_id, "." | "..") {
            return Err(FnuggError::invalid_input(format!(
                "Resort id {resort_id:?} is not a path segment"
            )));
        }
        Ok(())
    }
}
