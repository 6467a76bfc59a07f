//! Event-frequency trend analysis over time buckets.
//!
//! Events are bucketed by a period key derived from the calendar date of
//! their first location entry. Bucket order is the order in which each
//! key is first encountered while scanning events in original order --
//! deliberately *not* sorted, matching the dashboard contract. The trend
//! figure is the endpoint slope over the bucket counts, not a
//! regression.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use geowatch_types::{Event, TrendAnalysis};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filter::{EventFilter, filter_events};

/// Time-bucket granularity for trend analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    /// Bucket by `YYYY-MM`.
    #[default]
    Monthly,
    /// Bucket by `YYYY-W##` (week of year, Monday-start weeks; days
    /// before the year's first Monday fall in week 00). This is
    /// calendar-week numbering, not ISO week numbering.
    Weekly,
    /// Bucket by `YYYY-MM-DD`.
    Daily,
}

/// Error returned when a period name does not parse.
#[derive(Debug, thiserror::Error)]
#[error("unknown trend period: {0} (expected monthly, weekly, or daily)")]
pub struct TrendPeriodParseError(String);

impl FromStr for TrendPeriod {
    type Err = TrendPeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "daily" => Ok(Self::Daily),
            other => Err(TrendPeriodParseError(other.to_owned())),
        }
    }
}

impl TrendPeriod {
    /// Derive the bucket key for a calendar date.
    pub fn bucket_key(self, date: NaiveDate) -> String {
        match self {
            Self::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Weekly => {
                format!("{:04}-W{:02}", date.year(), calendar_week_of_year(date))
            }
            Self::Daily => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
        }
    }
}

/// Week-of-year with Monday-start weeks; week 00 covers the days before
/// the year's first Monday (strftime `%W` numbering).
fn calendar_week_of_year(date: NaiveDate) -> u32 {
    let day_of_year = date.ordinal();
    let weekday = date.weekday().num_days_from_monday();
    day_of_year.saturating_sub(weekday).saturating_add(6) / 7
}

/// Analyze event frequency over time buckets.
///
/// An optional category id restricts the input via the event filter
/// before bucketing (only the category criterion is applied). Events
/// without a parseable first-geometry date are skipped with a warning.
///
/// The output's `trend` is `(last - first) / bucket_count`, zero when
/// there are fewer than two buckets; `average`, `max`, and `min` are
/// zero-safe over the counts.
pub fn trend_analysis(
    events: &[Event],
    category: Option<&str>,
    period: TrendPeriod,
) -> TrendAnalysis {
    let mut filter = EventFilter::new();
    if let Some(category_id) = category {
        filter = filter.with_category(category_id);
    }
    let filtered = filter_events(events, &filter);

    // Insertion-ordered buckets: first date-key encountered comes first.
    let mut buckets: Vec<(String, u64)> = Vec::new();
    for event in &filtered {
        let Some(date) = event.first_geometry().and_then(|g| g.naive_date()) else {
            warn!(event_id = %event.id, "event has no parseable date; skipping trend bucket");
            continue;
        };
        let key = period.bucket_key(date);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count = count.saturating_add(1),
            None => buckets.push((key, 1)),
        }
    }

    let (periods, counts): (Vec<String>, Vec<u64>) = buckets.into_iter().unzip();
    summarize(periods, counts)
}

/// Assemble the trend summary figures from aligned period/count vectors.
#[allow(clippy::cast_precision_loss)]
fn summarize(periods: Vec<String>, counts: Vec<u64>) -> TrendAnalysis {
    let bucket_count = counts.len();

    let trend = if bucket_count > 1 {
        match (counts.first(), counts.last()) {
            (Some(&first), Some(&last)) => (last as f64 - first as f64) / bucket_count as f64,
            _ => 0.0,
        }
    } else {
        0.0
    };

    let average = if bucket_count == 0 {
        0.0
    } else {
        counts.iter().map(|&c| c as f64).sum::<f64>() / bucket_count as f64
    };

    let max = counts.iter().copied().max().unwrap_or(0);
    let min = counts.iter().copied().min().unwrap_or(0);

    TrendAnalysis {
        periods,
        counts,
        trend,
        average,
        max,
        min,
    }
}
