//! Resort directory: the list of resorts an operator can pick from at setup

use crate::client::FnuggClient;
use crate::error::{FnuggError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

/// Identifier and display name of one resort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortRef {
    pub id: String,
    pub name: String,
}

impl ResortRef {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Fetches the resort listing from the search endpoint
#[derive(Debug, Clone)]
pub struct ResortDirectory {
    client: FnuggClient,
    page_size: u32,
}

impl ResortDirectory {
    pub fn new(client: FnuggClient, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// List resorts sorted by name.
    ///
    /// Any failure, including a non-200 status or an unparsable body, is a
    /// [`FnuggError::Connection`].
    pub async fn list_resorts(&self) -> Result<Vec<ResortRef>> {
        let url = self.client.search_url(self.page_size)?;
        debug!("Fetching resorts from {url}");

        let response = self.client.get(url).await.map_err(|e| {
            error!(error = %e, "Error connecting to Fnugg");
            FnuggError::connection(format!("Failed to reach resort search: {e}"))
        })?;

        if !response.is_ok() {
            error!(status = %response.status, "Failed to get resorts");
            return Err(FnuggError::connection(format!(
                "Resort search returned {}",
                response.status
            )));
        }

        let document = response.json().map_err(|e| {
            error!(error = %e, "Resort search returned malformed JSON");
            FnuggError::connection(format!("Malformed resort search response: {e}"))
        })?;

        let resorts = parse_search_hits(&document);
        debug!("Returning {} sorted resorts", resorts.len());
        Ok(resorts)
    }
}

/// Extract resorts from a search document, sorted by name.
///
/// Hits without both an id and a name are skipped.
pub fn parse_search_hits(document: &Value) -> Vec<ResortRef> {
    let Some(hits) = document.pointer("/hits/hits").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut resorts: Vec<ResortRef> = hits
        .iter()
        .filter_map(|hit| {
            let id = scalar_text(hit.get("_id"))?;
            let name = scalar_text(hit.pointer("/_source/name"))?;
            Some(ResortRef { id, name })
        })
        .collect();

    resorts.sort_by(|a, b| a.name.cmp(&b.name));
    resorts
}

/// Non-empty string or number rendered as text
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
