//! Dashboard API server for GeoWatch.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for filtered events, the cached category
//!   taxonomy, summary statistics, trend analysis, and the multi-facet
//!   analysis report
//! - **A manual refresh endpoint** (`POST /api/refresh`) that re-fetches
//!   the upstream feed on demand
//! - **Minimal HTML status page** (`GET /`) showing cache counts, the
//!   last fetch time, and links to API endpoints
//!
//! # Architecture
//!
//! Handlers take an immutable snapshot reference from the shared
//! [`EventCache`](geowatch_feed::EventCache) and run the pure
//! aggregation functions from `geowatch-core` against it, so a request
//! in flight never observes a partial cache update and never blocks a
//! fetch.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ObserverError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
