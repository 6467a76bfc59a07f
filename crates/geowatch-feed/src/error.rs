//! Error types for the `geowatch-feed` crate.
//!
//! Fetch failures never cross the crate boundary as errors: the public
//! fetch surface logs them and reports booleans, retaining the previous
//! cache snapshot. [`FeedError`] exists for the internal fetch paths and
//! for configuration loading at startup.

/// Errors that can occur while configuring or talking to the feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request failed (connect, timeout, body read).
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status code.
    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not decode as the expected envelope.
    #[error("feed response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("invalid feed configuration: {0}")]
    Config(String),
}
