//! Event filtering and statistical aggregation for the GeoWatch dashboard.
//!
//! This crate holds all of the decision logic in the workspace: magnitude
//! resolution precedence, filter predicates, magnitude bucketing, latitude
//! region classification, trend bucketing, and the multi-facet analysis
//! report. It performs no I/O; callers hand it event slices taken from the
//! cache snapshot.
//!
//! # Modules
//!
//! - [`magnitude`] -- Resolves the optional (value, unit) pair for an
//!   event from its root fields or location history.
//! - [`region`] -- Pure latitude-to-region-band classification.
//! - [`filter`] -- Filter criteria and the event filter.
//! - [`stats`] -- Summary statistics (counts, daily series, magnitude
//!   buckets).
//! - [`trends`] -- Period bucketing and endpoint-slope trend analysis.
//! - [`analysis`] -- The multi-facet analysis report and the severity
//!   class taxonomy.
//!
//! # Error handling
//!
//! Every operation here is total: a malformed event is skipped with a
//! `tracing` warning and iteration continues; a non-numeric magnitude is
//! treated as absent. No error type crosses this crate's boundary except
//! [`trends::TrendPeriodParseError`] for unknown period names.

pub mod analysis;
pub mod filter;
pub mod magnitude;
pub mod region;
pub mod stats;
pub mod trends;

// Re-export primary entry points at crate root.
pub use analysis::{SeverityClass, analysis_report};
pub use filter::{EventFilter, filter_events};
pub use magnitude::{resolve_magnitude, resolve_paired_magnitude};
pub use region::Region;
pub use stats::summary_statistics;
pub use trends::{TrendPeriod, TrendPeriodParseError, trend_analysis};
