//! Configuration for the feed client.
//!
//! All configuration is loaded from environment variables with sensible
//! defaults, so the server runs against the public feed out of the box.

use std::time::Duration;

use crate::error::FeedError;

/// Default feed base URL (the public EONET v3 API).
const DEFAULT_BASE_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3";

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default event lookback window in days.
const DEFAULT_LOOKBACK_DAYS: u64 = 365;

/// Feed client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Base URL of the feed API (no trailing slash).
    pub base_url: String,
    /// Timeout applied to every feed request.
    pub timeout: Duration,
    /// Default lookback window for event fetches, in days.
    pub lookback_days: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables (all optional):
    /// - `GEOWATCH_FEED_URL` -- feed base URL
    /// - `GEOWATCH_FEED_TIMEOUT_MS` -- request timeout in milliseconds
    /// - `GEOWATCH_LOOKBACK_DAYS` -- default event lookback window
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] when a numeric variable is present
    /// but does not parse.
    pub fn from_env() -> Result<Self, FeedError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GEOWATCH_FEED_URL") {
            config.base_url = url.trim_end_matches('/').to_owned();
        }

        if let Ok(raw) = std::env::var("GEOWATCH_FEED_TIMEOUT_MS") {
            let millis: u64 = raw
                .parse()
                .map_err(|e| FeedError::Config(format!("invalid GEOWATCH_FEED_TIMEOUT_MS: {e}")))?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Ok(raw) = std::env::var("GEOWATCH_LOOKBACK_DAYS") {
            config.lookback_days = raw
                .parse()
                .map_err(|e| FeedError::Config(format!("invalid GEOWATCH_LOOKBACK_DAYS: {e}")))?;
        }

        Ok(config)
    }
}
