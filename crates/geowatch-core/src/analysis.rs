//! The multi-facet analysis report behind the analysis dashboard.
//!
//! One pass over the (date-windowed) events produces five facets: a
//! sorted daily trend series, primary-category counts, a geographic
//! region breakdown, a weekday histogram, and per-hazard-type severity
//! lists. Severity placement uses an enumerated category-id taxonomy
//! rather than display-title substring matching, so a renamed category
//! title cannot silently change classification.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use geowatch_types::{AnalysisReport, Event, SeverityEntry};
use tracing::warn;

use crate::filter::{EventFilter, filter_events};
use crate::magnitude::resolve_magnitude;
use crate::region::Region;

// ---------------------------------------------------------------------------
// Severity taxonomy
// ---------------------------------------------------------------------------

/// Hazard types tracked by the severity facet, in match-precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityClass {
    /// Wildfire events.
    Wildfire,
    /// Severe storms and tropical cyclones.
    Storm,
    /// Volcano events.
    Volcano,
    /// Earthquake events.
    Earthquake,
}

/// The fixed precedence order for severity placement: an event matching
/// several classes lands in the first one only.
const SEVERITY_PRECEDENCE: [SeverityClass; 4] = [
    SeverityClass::Wildfire,
    SeverityClass::Storm,
    SeverityClass::Volcano,
    SeverityClass::Earthquake,
];

impl SeverityClass {
    /// Map a feed category id to its severity class, if tracked.
    pub fn from_category_id(id: &str) -> Option<Self> {
        match id {
            "wildfires" => Some(Self::Wildfire),
            "severeStorms" | "tropicalCyclones" => Some(Self::Storm),
            "volcanoes" => Some(Self::Volcano),
            "earthquakes" => Some(Self::Earthquake),
            _ => None,
        }
    }

    /// Classify an event by first-match precedence over its categories.
    ///
    /// Checks classes in the fixed order wildfire, storm, volcano,
    /// earthquake; within each class, any of the event's categories may
    /// match. Events matching no tracked class return `None`.
    pub fn classify(event: &Event) -> Option<Self> {
        SEVERITY_PRECEDENCE.into_iter().find(|class| {
            event
                .categories
                .iter()
                .any(|cat| Self::from_category_id(&cat.id) == Some(*class))
        })
    }
}

// ---------------------------------------------------------------------------
// Report generation
// ---------------------------------------------------------------------------

/// Generate the analysis report for events within the lookback window.
///
/// `today` is supplied by the caller (the observer passes the current
/// UTC date) so the computation itself stays deterministic. The window
/// is `[today - period_days, today]`, applied as a start-date-only
/// filter.
///
/// Per-event failures skip that event's remaining facets only; the
/// function always returns a well-formed report.
pub fn analysis_report(events: &[Event], period_days: u64, today: NaiveDate) -> AnalysisReport {
    let start_date = today
        .checked_sub_days(Days::new(period_days))
        .unwrap_or(NaiveDate::MIN)
        .format("%Y-%m-%d")
        .to_string();

    let windowed = filter_events(events, &EventFilter::new().with_start_date(start_date));

    let mut report = AnalysisReport::default();
    let mut date_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut category_counts: Vec<(String, u64)> = Vec::new();

    for event in &windowed {
        let Some(geometry) = event.first_geometry() else {
            warn!(event_id = %event.id, "event has no geometry; skipping analysis facets");
            continue;
        };
        let Some(date) = geometry.calendar_date() else {
            warn!(event_id = %event.id, "event has no calendar date; skipping analysis facets");
            continue;
        };

        // Daily trend counts (sorted by the BTreeMap at assembly time).
        let daily = date_counts.entry(date.to_owned()).or_insert(0);
        *daily = daily.saturating_add(1);

        // Primary-category counts in first-encountered order.
        if let Some(primary) = event.primary_category() {
            match category_counts.iter_mut().find(|(t, _)| *t == primary.title) {
                Some((_, count)) => *count = count.saturating_add(1),
                None => category_counts.push((primary.title.clone(), 1)),
            }
        }

        // Geographic region band from the reference observation.
        let region = Region::from_latitude(geometry.latitude());
        let geo = report.geographic.entry(region.name().to_owned()).or_insert(0);
        *geo = geo.saturating_add(1);

        // Weekday histogram.
        if let Some(naive) = geometry.naive_date() {
            let weekday_index = usize::try_from(naive.weekday().num_days_from_monday());
            if let Ok(index) = weekday_index {
                report.weekday.increment(index);
            }
        }

        // Severity lists: only events whose magnitude resolves are
        // listed; magnitude-less events still count toward the facets
        // above.
        if let Some(class) = SeverityClass::classify(event)
            && let Some(magnitude) = resolve_magnitude(event)
        {
            let entry = SeverityEntry {
                date: date.to_owned(),
                magnitude: magnitude.value,
                unit: magnitude.unit,
                title: event.title.clone(),
                description: event.description.clone().unwrap_or_default(),
            };
            match class {
                SeverityClass::Wildfire => report.severity.wildfires.push(entry),
                SeverityClass::Storm => report.severity.storms.push(entry),
                SeverityClass::Volcano => report.severity.volcanoes.push(entry),
                SeverityClass::Earthquake => report.severity.earthquakes.push(entry),
            }
        }
    }

    // Assemble the aligned label/value series.
    for (date, count) in date_counts {
        report.trends.labels.push(date);
        report.trends.values.push(count);
    }
    for (title, count) in category_counts {
        report.categories.labels.push(title);
        report.categories.values.push(count);
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use geowatch_types::{CategoryRef, Geometry, MagnitudeScalar};

    fn category(id: &str, title: &str) -> CategoryRef {
        CategoryRef {
            id: String::from(id),
            title: String::from(title),
        }
    }

    fn event(
        id: &str,
        categories: Vec<CategoryRef>,
        date: &str,
        latitude: f64,
        magnitude: Option<f64>,
    ) -> Event {
        Event {
            id: String::from(id),
            title: format!("Event {id}"),
            description: Some(format!("Description of {id}")),
            categories,
            geometry: vec![Geometry {
                date: format!("{date}T00:00:00Z"),
                coordinates: [0.0, latitude],
                magnitude_value: magnitude.map(MagnitudeScalar::Number),
                magnitude_unit: magnitude.map(|_| String::from("units")),
            }],
            magnitude_value: None,
            magnitude_unit: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn severity_class_taxonomy() {
        assert_eq!(
            SeverityClass::from_category_id("wildfires"),
            Some(SeverityClass::Wildfire)
        );
        assert_eq!(
            SeverityClass::from_category_id("severeStorms"),
            Some(SeverityClass::Storm)
        );
        assert_eq!(
            SeverityClass::from_category_id("tropicalCyclones"),
            Some(SeverityClass::Storm)
        );
        assert_eq!(
            SeverityClass::from_category_id("volcanoes"),
            Some(SeverityClass::Volcano)
        );
        assert_eq!(
            SeverityClass::from_category_id("earthquakes"),
            Some(SeverityClass::Earthquake)
        );
        assert_eq!(SeverityClass::from_category_id("drought"), None);
    }

    #[test]
    fn wildfire_takes_precedence_over_storm() {
        let e = event(
            "both",
            vec![
                category("severeStorms", "Severe Storms"),
                category("wildfires", "Wildfires"),
            ],
            "2024-03-10",
            40.0,
            Some(3.0),
        );
        let report = analysis_report(&[e], 30, today());
        assert_eq!(report.severity.wildfires.len(), 1);
        assert!(report.severity.storms.is_empty());
    }

    #[test]
    fn magnitude_less_events_are_excluded_from_severity_only() {
        let e = event(
            "quiet",
            vec![category("earthquakes", "Earthquakes")],
            "2024-03-10",
            -40.0,
            None,
        );
        let report = analysis_report(&[e], 30, today());
        assert!(report.severity.earthquakes.is_empty());
        // Still counted by every other facet.
        assert_eq!(report.trends.values, vec![1]);
        assert_eq!(report.categories.labels, vec!["Earthquakes"]);
        assert_eq!(report.geographic.get("Southern Hemisphere"), Some(&1));
        assert_eq!(report.weekday.values.iter().sum::<u64>(), 1);
    }

    #[test]
    fn trend_labels_are_sorted_ascending() {
        let events = vec![
            event("late", vec![category("wildfires", "Wildfires")], "2024-03-15", 10.0, None),
            event("early", vec![category("wildfires", "Wildfires")], "2024-03-01", 10.0, None),
            event("mid", vec![category("wildfires", "Wildfires")], "2024-03-10", 10.0, None),
        ];
        let report = analysis_report(&events, 60, today());
        assert_eq!(
            report.trends.labels,
            vec!["2024-03-01", "2024-03-10", "2024-03-15"]
        );
        assert_eq!(report.trends.values, vec![1, 1, 1]);
    }

    #[test]
    fn category_labels_keep_first_encounter_order() {
        let events = vec![
            event("a", vec![category("volcanoes", "Volcanoes")], "2024-03-10", 0.0, None),
            event("b", vec![category("wildfires", "Wildfires")], "2024-03-11", 0.0, None),
            event("c", vec![category("volcanoes", "Volcanoes")], "2024-03-12", 0.0, None),
        ];
        let report = analysis_report(&events, 30, today());
        assert_eq!(report.categories.labels, vec!["Volcanoes", "Wildfires"]);
        assert_eq!(report.categories.values, vec![2, 1]);
    }

    #[test]
    fn lookback_window_excludes_old_events() {
        let events = vec![
            event("old", vec![category("wildfires", "Wildfires")], "2023-01-01", 10.0, None),
            event("new", vec![category("wildfires", "Wildfires")], "2024-03-10", 10.0, None),
        ];
        let report = analysis_report(&events, 30, today());
        assert_eq!(report.trends.labels, vec!["2024-03-10"]);
    }

    #[test]
    fn weekday_histogram_uses_monday_first_indexing() {
        // 2024-03-10 is a Sunday; 2024-03-11 is a Monday.
        let events = vec![
            event("sun", vec![category("wildfires", "Wildfires")], "2024-03-10", 10.0, None),
            event("mon", vec![category("wildfires", "Wildfires")], "2024-03-11", 10.0, None),
        ];
        let report = analysis_report(&events, 30, today());
        assert_eq!(report.weekday.values.first(), Some(&1)); // Monday
        assert_eq!(report.weekday.values.last(), Some(&1)); // Sunday
    }

    #[test]
    fn scenario_two_event_geographic_breakdown() {
        let events = vec![
            event("E1", vec![category("wildfires", "Wildfires")], "2024-03-01", 10.0, Some(2.0)),
            event("E2", vec![category("earthquakes", "Earthquakes")], "2024-03-05", -40.0, None),
        ];
        let report = analysis_report(&events, 30, today());
        assert_eq!(report.geographic.get("Tropics (North)"), Some(&1));
        assert_eq!(report.geographic.get("Southern Hemisphere"), Some(&1));
    }

    #[test]
    fn untracked_category_is_omitted_from_all_severity_lists() {
        let e = event(
            "dusty",
            vec![category("dustHaze", "Dust and Haze")],
            "2024-03-10",
            10.0,
            Some(4.0),
        );
        let report = analysis_report(&[e], 30, today());
        assert!(report.severity.wildfires.is_empty());
        assert!(report.severity.storms.is_empty());
        assert!(report.severity.volcanoes.is_empty());
        assert!(report.severity.earthquakes.is_empty());
    }

    #[test]
    fn severity_entry_carries_resolved_fields() {
        let e = event(
            "storm",
            vec![category("tropicalCyclones", "Tropical Cyclones")],
            "2024-03-10",
            18.0,
            Some(65.0),
        );
        let report = analysis_report(&[e], 30, today());
        let entry = report.severity.storms.first().unwrap();
        assert_eq!(entry.date, "2024-03-10");
        assert!((entry.magnitude - 65.0).abs() < f64::EPSILON);
        assert_eq!(entry.unit, "units");
        assert_eq!(entry.title, "Event storm");
        assert_eq!(entry.description, "Description of storm");
    }
}
