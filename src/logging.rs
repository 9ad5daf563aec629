//! Logging setup with optional file rotation
//!
//! Builds a `tracing` subscriber from [`LoggingConfig`]. The filter comes from
//! the configured directive only; no environment variables are consulted.

use crate::config::LoggingConfig;
use crate::error::{FnuggError, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "fnugg-sensors.log";

/// Resolved logging settings
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive
    pub directive: String,

    /// Log to file
    pub file_path: Option<PathBuf>,

    /// Log to stderr
    pub stderr: bool,

    /// Include targets in log lines
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from(&LoggingConfig::default())
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            directive: config.level.trim().to_string(),
            file_path: config.file_path.clone(),
            stderr: config.stderr,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Build the event filter for this configuration
    pub fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.directive)
            .map_err(|e| FnuggError::config(format!("Invalid log filter '{}': {e}", self.directive)))
    }
}

/// Install the global subscriber
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = config.filter()?;

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(config.with_target)
    });

    let file_layer = match &config.file_path {
        Some(file_path) => {
            let directory = file_path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory)?;

            let file_name = file_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));
            let file_appender = tracing_appender::rolling::daily(directory, file_name);

            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(config.with_target),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| FnuggError::config(format!("Logging already initialised: {e}")))
}
