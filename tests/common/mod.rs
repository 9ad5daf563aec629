//! Common test utilities

#![allow(dead_code)]

pub mod fnugg_mock;
pub mod test_fixtures;

use fnugg_sensors::config::{ApiConfig, PollingConfig};
use std::time::Duration;
use url::Url;

/// API configuration pointing at a mock server
pub fn api_config(base_url: &str, request_timeout: Duration) -> ApiConfig {
    ApiConfig {
        base_url: Url::parse(base_url).expect("mock server URL"),
        request_timeout,
        ..ApiConfig::default()
    }
}

/// Default throttling with lenient opening hours
pub fn polling_config() -> PollingConfig {
    PollingConfig {
        staleness_threshold: Duration::from_secs(20 * 60),
        strict_opening_hours: false,
    }
}
