//! Upstream feed client and event cache for the GeoWatch dashboard.
//!
//! The feed client fetches event and category collections from the
//! external geospatial-event feed over HTTP; the cache holds the last
//! successfully fetched snapshot in memory. Writes replace the whole
//! snapshot atomically; readers take an immutable snapshot reference, so
//! in-flight aggregation never observes a partial update.
//!
//! # Modules
//!
//! - [`cache`] -- Read-copy-update snapshot cache.
//! - [`client`] -- HTTP feed client with boolean fetch contract.
//! - [`config`] -- Environment-based configuration.
//! - [`error`] -- Error types internal to this crate.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

// Re-export primary types at crate root.
pub use cache::{EventCache, FeedSnapshot};
pub use client::{FeedClient, InitOutcome};
pub use config::FeedConfig;
pub use error::FeedError;
