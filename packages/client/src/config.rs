//! Client configuration.
//!
//! `AppConfig` is built once at startup and handed to whatever needs it.
//! Nothing reads configuration from ambient state after that point.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Default chat backend base URL
pub const DEFAULT_API_BASE_URL: &str = "https://chatbackend-yakvenalex.amvera.io";

/// Default real-time gateway WebSocket URL
pub const DEFAULT_REALTIME_URL: &str =
    "wss://mycentrifugo-yakvenalex.amvera.io/connection/websocket";

/// Errors related to configuration values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL '{url}' must use one of the schemes: {expected}")]
    UnsupportedScheme { url: String, expected: &'static str },
}

/// Immutable client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    api_base_url: String,
    realtime_url: String,
    request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Create a configuration from the two service URLs.
    ///
    /// The API base must be `http`/`https` and loses any trailing slash. The
    /// real-time URL must be `ws`/`wss`.
    pub fn new(api_base_url: &str, realtime_url: &str) -> Result<Self, ConfigError> {
        let api = parse_url(api_base_url, &["http", "https"], "http, https")?;
        let realtime = parse_url(realtime_url, &["ws", "wss"], "ws, wss")?;

        Ok(Self {
            api_base_url: api.as_str().trim_end_matches('/').to_string(),
            realtime_url: realtime.to_string(),
            request_timeout: None,
        })
    }

    /// Limit every backend request to `timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn realtime_url(&self) -> &str {
        &self.realtime_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            realtime_url: DEFAULT_REALTIME_URL.to_string(),
            request_timeout: None,
        }
    }
}

fn parse_url(raw: &str, schemes: &[&str], expected: &'static str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !schemes.contains(&url.scheme()) {
        return Err(ConfigError::UnsupportedScheme {
            url: raw.to_string(),
            expected,
        });
    }
    Ok(url)
}
