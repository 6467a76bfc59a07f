//! Event filtering against caller-supplied criteria.
//!
//! The filter evaluates cached events in their original order against
//! optional date, category, and magnitude bounds. Malformed events are
//! skipped individually; a bad record never aborts evaluation of the
//! rest of the collection.

use geowatch_types::Event;
use tracing::warn;

use crate::magnitude::resolve_magnitude;

/// Filter criteria for [`filter_events`]. All bounds are optional; an
/// empty filter passes every well-formed event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Inclusive lower calendar-date bound (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Inclusive upper calendar-date bound (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Category id the event's *primary* category must match.
    ///
    /// Secondary categories are ignored for filtering. This is a
    /// documented simplification of the dashboard contract, not an
    /// oversight.
    pub category_id: Option<String>,
    /// Inclusive lower magnitude bound.
    pub min_magnitude: Option<f64>,
    /// Inclusive upper magnitude bound.
    pub max_magnitude: Option<f64>,
}

impl EventFilter {
    /// Create an empty filter that passes every well-formed event.
    pub const fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            category_id: None,
            min_magnitude: None,
            max_magnitude: None,
        }
    }

    /// Restrict to events on or after the given calendar date.
    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Restrict to events on or before the given calendar date.
    #[must_use]
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Restrict to events whose primary category has the given id.
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Restrict to events with resolved magnitude at or above `min`.
    #[must_use]
    pub const fn with_min_magnitude(mut self, min: f64) -> Self {
        self.min_magnitude = Some(min);
        self
    }

    /// Restrict to events with resolved magnitude at or below `max`.
    #[must_use]
    pub const fn with_max_magnitude(mut self, max: f64) -> Self {
        self.max_magnitude = Some(max);
        self
    }

    /// Whether the event passes every supplied bound.
    ///
    /// Returns `None` when the event is missing a field a supplied bound
    /// needs (malformed record); the caller skips it.
    fn matches(&self, event: &Event) -> Option<bool> {
        // Date bounds compare the 10-character calendar-date prefix of
        // the first location entry lexicographically. Valid because the
        // dates are zero-padded ISO form.
        if self.start_date.is_some() || self.end_date.is_some() {
            let date = event.first_geometry().and_then(|g| g.calendar_date())?;
            if let Some(start) = self.start_date.as_deref()
                && date < start
            {
                return Some(false);
            }
            if let Some(end) = self.end_date.as_deref()
                && date > end
            {
                return Some(false);
            }
        }

        if let Some(category_id) = self.category_id.as_deref() {
            let primary = event.primary_category()?;
            if primary.id != category_id {
                return Some(false);
            }
        }

        // Events without resolvable magnitude pass unconditionally,
        // however restrictive the bounds. Both bounds are inclusive.
        if self.min_magnitude.is_some() || self.max_magnitude.is_some() {
            if let Some(magnitude) = resolve_magnitude(event) {
                if let Some(min) = self.min_magnitude
                    && magnitude.value < min
                {
                    return Some(false);
                }
                if let Some(max) = self.max_magnitude
                    && magnitude.value > max
                {
                    return Some(false);
                }
            }
        }

        Some(true)
    }
}

/// Produce the subset of `events` matching `filter`, in original order.
///
/// Returns an empty vector for an empty input; never errors. Malformed
/// events are logged and skipped.
pub fn filter_events(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|event| match filter.matches(event) {
            Some(keep) => keep,
            None => {
                warn!(event_id = %event.id, "skipping malformed event during filtering");
                false
            }
        })
        .cloned()
        .collect()
}
