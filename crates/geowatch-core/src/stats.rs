//! Summary statistics over the full event cache.
//!
//! Produces the total event count, per-primary-category counts, daily
//! counts, and the low/medium/high magnitude buckets. Facets are
//! accumulated independently per event, so one malformed field never
//! discards an event's contributions to the other facets.

use geowatch_types::{Event, SummaryStatistics};
use tracing::warn;

use crate::magnitude::resolve_paired_magnitude;

/// Magnitudes below this are `low`.
const MEDIUM_THRESHOLD: f64 = 1.5;

/// Magnitudes at or above this are `high`.
const HIGH_THRESHOLD: f64 = 5.0;

/// Compute summary statistics over the given events.
///
/// Every event contributes to `event_count` and to exactly one
/// magnitude bucket: bucketing uses the paired magnitude resolution
/// (value and unit at the same level), and an event with no resolvable
/// pair is classified `low` by policy. The per-category and per-date
/// facets skip events missing the respective field.
pub fn summary_statistics(events: &[Event]) -> SummaryStatistics {
    let mut stats = SummaryStatistics {
        event_count: u64::try_from(events.len()).unwrap_or(u64::MAX),
        ..SummaryStatistics::default()
    };

    for event in events {
        match event.primary_category() {
            Some(primary) => {
                let count = stats.categories.entry(primary.title.clone()).or_insert(0);
                *count = count.saturating_add(1);
            }
            None => warn!(event_id = %event.id, "event has no categories; skipping category facet"),
        }

        match event.first_geometry().and_then(|g| g.calendar_date()) {
            Some(date) => {
                let count = stats.daily_counts.entry(date.to_owned()).or_insert(0);
                *count = count.saturating_add(1);
            }
            None => warn!(event_id = %event.id, "event has no dated geometry; skipping daily facet"),
        }

        match resolve_paired_magnitude(event) {
            Some(magnitude) if magnitude.value >= HIGH_THRESHOLD => {
                stats.magnitudes.high = stats.magnitudes.high.saturating_add(1);
            }
            Some(magnitude) if magnitude.value >= MEDIUM_THRESHOLD => {
                stats.magnitudes.medium = stats.magnitudes.medium.saturating_add(1);
            }
            // Below the medium threshold, or no resolvable pair at all:
            // both count as low so the buckets sum to event_count.
            _ => stats.magnitudes.low = stats.magnitudes.low.saturating_add(1),
        }
    }

    stats
}
