//! Axum router construction for the dashboard API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/events` -- filtered event list
/// - `GET /api/categories` -- category taxonomy
/// - `GET /api/summary` -- summary statistics
/// - `GET /api/trends` -- trend analysis
/// - `GET /api/analysis/data` -- multi-facet analysis report
/// - `POST /api/refresh` -- manual feed refresh
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/events", get(handlers::get_events))
        .route("/api/categories", get(handlers::get_categories))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/trends", get(handlers::get_trends))
        .route("/api/analysis/data", get(handlers::get_analysis))
        .route("/api/refresh", post(handlers::refresh))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
