//! Shared application state for the dashboard API server.
//!
//! [`AppState`] holds the shared event cache that all REST endpoints
//! read from and, when the server runs with a live upstream connection,
//! the feed client behind the manual refresh endpoint.

use std::sync::Arc;

use geowatch_feed::{EventCache, FeedClient};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// feed client is optional so the router can be exercised against a
/// pre-populated cache without any upstream connectivity (tests, fixture
/// replay).
#[derive(Clone)]
pub struct AppState {
    /// The shared snapshot cache read by every endpoint.
    pub cache: Arc<EventCache>,
    /// Feed client for the manual refresh endpoint (present when the
    /// server is connected to the upstream feed).
    pub client: Option<FeedClient>,
}

impl AppState {
    /// Create state over a cache with no upstream feed attached.
    pub const fn new(cache: Arc<EventCache>) -> Self {
        Self {
            cache,
            client: None,
        }
    }

    /// Create state with a feed client attached for manual refresh.
    pub const fn with_client(cache: Arc<EventCache>, client: FeedClient) -> Self {
        Self {
            cache,
            client: Some(client),
        }
    }
}
