//! Error types for the Fnugg sensor adapter
//!
//! Soft fetch failures (non-200 status, timeouts, unparsable bodies during a
//! data refresh) are not represented here: they surface as `Ok(false)` from
//! [`crate::services::resort_data::ResortDataFetcher::refresh`]. Everything in
//! this enum is something the caller has to look at.

use thiserror::Error;

/// Result type alias for Fnugg operations
pub type Result<T> = std::result::Result<T, FnuggError>;

/// Error types for Fnugg operations
#[derive(Error, Debug)]
pub enum FnuggError {
    /// The resort directory could not be reached or returned garbage
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transport-level HTTP failure (DNS, TCP, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request exceeded the configured bound
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// A payload field the transform cannot do without
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FnuggError {
    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Short label for structured log fields
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Http(_) => "transport",
            Self::Json(_) => "json",
            Self::Timeout(_) => "timeout",
            Self::MissingField(_) => "payload",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "input",
            Self::Io(_) => "io",
        }
    }

    /// Whether trying again later can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Http(_) | Self::Timeout(_) | Self::MissingField(_)
        )
    }

    /// Whether this is a raw network-stack failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
