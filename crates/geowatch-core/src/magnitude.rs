//! Magnitude resolution for hazard events.
//!
//! The feed records magnitude in two places: optionally at the event
//! root, and optionally on each entry of the location history. Resolution
//! is a first-match search, not an aggregation: the root wins, otherwise
//! the first location entry with a parseable value wins. This precedence
//! is canonical for every consumer in the workspace -- filtering, summary
//! statistics, and the analysis report all resolve the same way.

use geowatch_types::{Event, Magnitude};

/// Resolve the magnitude pair for an event.
///
/// Resolution order:
///
/// 1. A root `magnitude_value` that parses as a finite number, paired
///    with the root unit (empty string when the unit is absent).
/// 2. The first location-history entry whose `magnitude_value` parses;
///    null or unparseable values are skipped and the scan continues.
/// 3. `None` when nothing matched.
pub fn resolve_magnitude(event: &Event) -> Option<Magnitude> {
    if let Some(value) = event.magnitude_value.as_ref().and_then(|m| m.as_f64()) {
        return Some(Magnitude::new(
            value,
            event.magnitude_unit.clone().unwrap_or_default(),
        ));
    }

    event.geometry.iter().find_map(|geo| {
        geo.magnitude_value.as_ref().and_then(|m| m.as_f64()).map(|value| {
            Magnitude::new(value, geo.magnitude_unit.clone().unwrap_or_default())
        })
    })
}

/// Resolve a magnitude pair requiring value *and* unit at the same level.
///
/// Same search order as [`resolve_magnitude`], but a level only matches
/// when both the value and the unit are present there (the root pair, or
/// a single location entry's pair). A mixed value-from-root /
/// unit-from-geometry combination is never produced. Used by the summary
/// statistics bucketing.
pub fn resolve_paired_magnitude(event: &Event) -> Option<Magnitude> {
    if let (Some(scalar), Some(unit)) = (&event.magnitude_value, &event.magnitude_unit)
        && let Some(value) = scalar.as_f64()
    {
        return Some(Magnitude::new(value, unit.clone()));
    }

    event.geometry.iter().find_map(|geo| {
        match (&geo.magnitude_value, &geo.magnitude_unit) {
            (Some(scalar), Some(unit)) => scalar
                .as_f64()
                .map(|value| Magnitude::new(value, unit.clone())),
            _ => None,
        }
    })
}
