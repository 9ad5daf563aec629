//! HTTP client for the Fnugg API
//!
//! Thin wrapper over a pooled `reqwest::Client`. The host normally owns the
//! client session; [`FnuggClient::with_http_client`] takes it as-is. Every
//! request is bounded by the configured timeout, body read included.

use crate::config::ApiConfig;
use crate::error::{FnuggError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

/// Raw upstream reply
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Client for the Fnugg search and resort endpoints
#[derive(Debug, Clone)]
pub struct FnuggClient {
    /// HTTP client instance
    http: Client,

    /// API root
    base_url: Url,

    /// Per-request bound
    request_timeout: Duration,
}

impl FnuggClient {
    /// Create a client with its own connection pool
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FnuggError::connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(http, config))
    }

    /// Create a client on top of a host-provided session
    pub fn with_http_client(http: Client, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: directory_url(&config.base_url),
            request_timeout: config.request_timeout,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FnuggError::invalid_input(format!("Invalid URL path {path}: {e}")))
    }

    /// `GET /search?size={size}`
    pub fn search_url(&self, size: u32) -> Result<Url> {
        let mut url = self.build_url("search")?;
        url.query_pairs_mut().append_pair("size", &size.to_string());
        Ok(url)
    }

    /// `GET /get/resort/{resort_id}/`
    pub fn resort_url(&self, resort_id: &str) -> Result<Url> {
        if resort_id.trim().is_empty() {
            return Err(FnuggError::invalid_input("Resort id must not be empty"));
        }
        if matches!(resort_id, "." | "..") {
            return Err(FnuggError::invalid_input(format!(
                "Resort id {resort_id:?} is not a path segment"
            )));
        }
        self.build_url(&format!("get/resort/{}/", urlencoding::encode(resort_id)))
    }

    /// Issue a GET and read the whole body within the timeout.
    ///
    /// Non-200 statuses are returned, not raised; the caller decides what a
    /// bad status means.
    pub async fn get(&self, url: Url) -> Result<ApiResponse> {
        debug!("GET {url}");

        let request = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(ApiResponse { status, body })
        };

        match timeout(self.request_timeout, exchange).await {
            Ok(Ok(response)) => {
                debug!(status = %response.status, bytes = response.body.len(), "Response from {url}");
                Ok(response)
            }
            Ok(Err(e)) if e.is_timeout() => Err(FnuggError::timeout(format!(
                "Request to {url} timed out: {e}"
            ))),
            Ok(Err(e)) => Err(FnuggError::Http(e)),
            Err(_) => Err(FnuggError::timeout(format!(
                "Request to {url} exceeded {:?}",
                self.request_timeout
            ))),
        }
    }
}

/// `base` with a trailing slash, so relative joins extend its path
pub fn directory_url(base: &Url) -> Url {
    let mut url = base.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
