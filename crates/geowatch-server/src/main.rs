//! GeoWatch server binary.
//!
//! This is the main entry point that wires together the feed client,
//! the shared event cache, and the dashboard API server. It loads
//! configuration from the environment, runs the initial data load, and
//! serves the API until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load feed and server configuration from the environment
//! 3. Create the shared event cache
//! 4. Create the feed client and run the initial data load
//! 5. Assemble the application state and serve the dashboard API
//!
//! A failed initial load is logged but does not abort startup: the
//! server comes up over an empty cache and a `POST /api/refresh` can
//! populate it later.

use std::sync::Arc;

use geowatch_feed::{EventCache, FeedClient, FeedConfig};
use geowatch_observer::{AppState, ServerConfig, start_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point for the GeoWatch server.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the feed client cannot
/// be constructed, or the HTTP server fails to bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("geowatch-server starting");

    // 2. Load configuration from the environment.
    let feed_config = FeedConfig::from_env()?;
    info!(
        base_url = feed_config.base_url,
        timeout_ms = feed_config.timeout.as_millis(),
        lookback_days = feed_config.lookback_days,
        "Feed configuration loaded"
    );

    let server_config = ServerConfig::from_env()?;
    info!(
        host = server_config.host,
        port = server_config.port,
        "Server configuration loaded"
    );

    // 3. Create the shared event cache.
    let cache = Arc::new(EventCache::new());

    // 4. Create the feed client and run the initial data load.
    let client = FeedClient::new(&feed_config, Arc::clone(&cache))?;
    let outcome = client.initialize().await;
    if !outcome.all_ok() {
        warn!(
            categories_ok = outcome.categories,
            events_ok = outcome.events,
            "starting with a partially populated cache; use POST /api/refresh to retry"
        );
    }

    // 5. Serve the dashboard API.
    let state = Arc::new(AppState::with_client(cache, client));
    start_server(&server_config, state).await?;

    info!("geowatch-server shutdown complete");
    Ok(())
}
