//! Shared type definitions for the GeoWatch hazard dashboard.
//!
//! This crate is the single source of truth for all types used across the
//! GeoWatch workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the dashboard frontend.
//!
//! # Modules
//!
//! - [`events`] -- Feed-facing records (events, geometry, categories) and
//!   the magnitude scalar/pair types
//! - [`reports`] -- Aggregation output shapes served by the dashboard API

pub mod events;
pub mod reports;

// Re-export all public types at crate root for convenience.
pub use events::{Category, CategoryRef, Event, Geometry, Magnitude, MagnitudeScalar};
pub use reports::{
    AnalysisReport, LabeledSeries, MagnitudeBuckets, SeverityBreakdown, SeverityEntry,
    SummaryStatistics, TrendAnalysis, WeekdayHistogram,
};
