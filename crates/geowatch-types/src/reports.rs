//! Aggregation output shapes served by the dashboard API.
//!
//! These are the response bodies for the summary, trend, and analysis
//! endpoints. All of them are well-formed (possibly empty/zero) for any
//! input; aggregation never surfaces an error to the dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Magnitude bucket counts for the summary dashboard.
///
/// Thresholds: `low` below 1.5, `medium` in `[1.5, 5)`, `high` at 5 and
/// above. Events with no resolvable (value, unit) pair are counted as
/// `low` by policy, so the three buckets always sum to the event count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MagnitudeBuckets {
    /// Events with magnitude below 1.5, plus events without magnitude.
    pub low: u64,
    /// Events with magnitude in `[1.5, 5)`.
    pub medium: u64,
    /// Events with magnitude of 5 or more.
    pub high: u64,
}

impl MagnitudeBuckets {
    /// Total events counted across all three buckets.
    pub const fn total(&self) -> u64 {
        self.low
            .saturating_add(self.medium)
            .saturating_add(self.high)
    }
}

/// Summary statistics over the full (unfiltered) event cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SummaryStatistics {
    /// Total number of cached events.
    pub event_count: u64,
    /// Occurrence count per primary-category title.
    pub categories: BTreeMap<String, u64>,
    /// Magnitude bucket counts.
    pub magnitudes: MagnitudeBuckets,
    /// Occurrence count per calendar date (first geometry entry).
    pub daily_counts: BTreeMap<String, u64>,
}

// ---------------------------------------------------------------------------
// Trend analysis
// ---------------------------------------------------------------------------

/// Event-frequency trend over time buckets.
///
/// `periods` and `counts` are aligned; bucket order is the order in
/// which each period key was first encountered while scanning events,
/// not sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TrendAnalysis {
    /// Bucket keys in first-encountered order.
    pub periods: Vec<String>,
    /// Event count per bucket, aligned with [`Self::periods`].
    pub counts: Vec<u64>,
    /// Endpoint slope: (last bucket count - first bucket count) divided
    /// by the number of buckets. Zero with one or zero buckets.
    pub trend: f64,
    /// Mean of the bucket counts (zero when there are no buckets).
    pub average: f64,
    /// Largest bucket count (zero when there are no buckets).
    pub max: u64,
    /// Smallest bucket count (zero when there are no buckets).
    pub min: u64,
}

// ---------------------------------------------------------------------------
// Analysis report
// ---------------------------------------------------------------------------

/// A labelled value series for chart rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LabeledSeries {
    /// Chart labels.
    pub labels: Vec<String>,
    /// Values aligned with [`Self::labels`].
    pub values: Vec<u64>,
}

/// Fixed seven-slot weekday histogram ordered Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeekdayHistogram {
    /// Weekday names, always Monday..Sunday.
    pub labels: Vec<String>,
    /// Event count per weekday, aligned with [`Self::labels`].
    pub values: Vec<u64>,
}

impl Default for WeekdayHistogram {
    fn default() -> Self {
        Self {
            labels: Vec::from(
                [
                    "Monday",
                    "Tuesday",
                    "Wednesday",
                    "Thursday",
                    "Friday",
                    "Saturday",
                    "Sunday",
                ]
                .map(String::from),
            ),
            values: vec![0; 7],
        }
    }
}

impl WeekdayHistogram {
    /// Increment the slot for a weekday index (0 = Monday .. 6 = Sunday).
    ///
    /// Out-of-range indices are ignored.
    pub fn increment(&mut self, weekday_index: usize) {
        if let Some(slot) = self.values.get_mut(weekday_index) {
            *slot = slot.saturating_add(1);
        }
    }
}

/// One event entry in a per-hazard-type severity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeverityEntry {
    /// Calendar date of the event's reference observation.
    pub date: String,
    /// Resolved magnitude value.
    pub magnitude: f64,
    /// Resolved magnitude unit (may be empty).
    pub unit: String,
    /// Event title.
    pub title: String,
    /// Event description (empty string when the feed omits it).
    pub description: String,
}

/// Per-hazard-type severity lists.
///
/// Each event appears in at most one list; events without resolvable
/// magnitude are excluded from all four.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeverityBreakdown {
    /// Wildfire events with resolved magnitude.
    pub wildfires: Vec<SeverityEntry>,
    /// Severe-storm and tropical-cyclone events with resolved magnitude.
    pub storms: Vec<SeverityEntry>,
    /// Volcano events with resolved magnitude.
    pub volcanoes: Vec<SeverityEntry>,
    /// Earthquake events with resolved magnitude.
    pub earthquakes: Vec<SeverityEntry>,
}

/// The multi-facet analysis report behind the analysis dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnalysisReport {
    /// Daily event counts with dates sorted ascending.
    pub trends: LabeledSeries,
    /// Primary-category counts in first-encountered order.
    pub categories: LabeledSeries,
    /// Event count per latitude region band.
    pub geographic: BTreeMap<String, u64>,
    /// Per-hazard-type severity lists.
    pub severity: SeverityBreakdown,
    /// Weekday histogram.
    pub weekday: WeekdayHistogram,
}
