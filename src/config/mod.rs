//! Configuration management for the Fnugg sensor adapter

pub mod resort_entry;

pub use resort_entry::ResortEntry;

use crate::client::http_client::directory_url;
use crate::error::{FnuggError, Result};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default upstream API host
pub const DEFAULT_BASE_URL: &str = "https://api.fnugg.no/";

/// Adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FnuggConfig {
    /// Upstream API settings
    pub api: ApiConfig,

    /// Refresh throttling
    pub polling: PollingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. "https://api.fnugg.no/"
    pub base_url: Url,

    /// Bound on a single request, body included
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Number of hits requested from the search endpoint
    pub search_page_size: u32,

    /// User agent sent when the adapter builds its own HTTP client
    pub user_agent: String,
}

/// Refresh throttling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Minimum time since the last successful update before a tick refreshes
    #[serde(with = "humantime_serde")]
    pub staleness_threshold: Duration,

    /// Fail the refresh when today's opening hours are missing from an
    /// otherwise present opening-hours object
    pub strict_opening_hours: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "fnugg_sensors=debug"
    pub level: String,

    /// Optional log file (rotated daily)
    pub file_path: Option<PathBuf>,

    /// Log to stderr
    pub stderr: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: Duration::from_secs(10),
            search_page_size: 150,
            user_agent: format!("fnugg-sensors/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            staleness_threshold: Duration::from_secs(20 * 60),
            strict_opening_hours: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            stderr: true,
        }
    }
}

impl FnuggConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()
            .map_err(|e| {
                FnuggError::config(format!("Failed to read {}: {e}", path.display()))
            })?;
        Self::finish(settings)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| FnuggError::config(format!("Invalid configuration: {e}")))?;
        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self> {
        let mut config: Self = settings
            .try_deserialize()
            .map_err(|e| FnuggError::config(format!("Invalid configuration: {e}")))?;
        config.api.base_url = directory_url(&config.api.base_url);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.cannot_be_a_base() {
            return Err(FnuggError::config(format!(
                "API base URL {} cannot be used as a base",
                self.api.base_url
            )));
        }

        if self.api.request_timeout.is_zero() {
            return Err(FnuggError::config("Request timeout must be greater than zero"));
        }

        if self.api.search_page_size == 0 {
            return Err(FnuggError::config("Search page size must be greater than zero"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(FnuggError::config("Logging level must not be empty"));
        }

        Ok(())
    }
}
