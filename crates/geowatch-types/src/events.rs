//! Feed-facing entity records for the GeoWatch dashboard.
//!
//! Covers the event, geometry, and category records returned by the
//! upstream geospatial-event feed, plus the magnitude types used by the
//! aggregation core. Field names follow the feed's wire format
//! (`magnitudeValue` / `magnitudeUnit`); everything else is snake\_case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of leading characters of a geometry date that carry the
/// calendar date (`YYYY-MM-DD`).
const CALENDAR_DATE_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Magnitude
// ---------------------------------------------------------------------------

/// A magnitude value as it appears on the wire: the feed serves both
/// JSON numbers and numeric strings for the same field.
///
/// Use [`MagnitudeScalar::as_f64`] to obtain the numeric value; anything
/// that does not parse as a finite number is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum MagnitudeScalar {
    /// A plain JSON number.
    Number(f64),
    /// A numeric value encoded as a string (possibly padded or empty).
    Text(String),
}

impl MagnitudeScalar {
    /// Interpret the scalar as a finite `f64`.
    ///
    /// Returns `None` for empty/whitespace strings, unparseable text,
    /// and non-finite numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|v| v.is_finite()),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
    }
}

/// A resolved (value, unit) magnitude pair.
///
/// At most one pair is associated with an event for any given operation;
/// the unit may be an empty string when the feed omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Magnitude {
    /// The numeric magnitude value.
    pub value: f64,
    /// The unit the value is expressed in (e.g. `kts`, `Magnitude(Richter)`).
    pub unit: String,
}

impl Magnitude {
    /// Create a magnitude pair.
    pub const fn new(value: f64, unit: String) -> Self {
        Self { value, unit }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// One dated location (and optional magnitude) observation within an
/// event's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Geometry {
    /// ISO-8601 date-time string. Only the leading 10 characters (the
    /// calendar date) are semantically used by the aggregation core.
    pub date: String,
    /// Coordinate pair in feed order: longitude, then latitude.
    pub coordinates: [f64; 2],
    /// Magnitude value recorded for this observation, if any.
    #[serde(rename = "magnitudeValue", default)]
    pub magnitude_value: Option<MagnitudeScalar>,
    /// Unit for [`Self::magnitude_value`], if any.
    #[serde(rename = "magnitudeUnit", default)]
    pub magnitude_unit: Option<String>,
}

impl Geometry {
    /// The `YYYY-MM-DD` calendar-date prefix of the observation date.
    ///
    /// Returns `None` when the date string is shorter than 10 characters.
    pub fn calendar_date(&self) -> Option<&str> {
        self.date.get(..CALENDAR_DATE_LEN)
    }

    /// Parse the calendar-date prefix into a [`NaiveDate`].
    pub fn naive_date(&self) -> Option<NaiveDate> {
        self.calendar_date()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Longitude in degrees (first coordinate).
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude in degrees (second coordinate).
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A category reference attached to an event.
///
/// Events carry an ordered, non-empty category list; order is relevance
/// and the first entry is treated as the primary category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CategoryRef {
    /// Stable category identifier (e.g. `wildfires`).
    pub id: String,
    /// Display name (e.g. `Wildfires`).
    pub title: String,
}

/// A taxonomy entry from the feed's categories endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Category {
    /// Stable category identifier.
    pub id: String,
    /// Display name.
    pub title: String,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One hazard occurrence record with categories, location history, and
/// optional magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Stable event identifier assigned by the feed.
    pub id: String,
    /// Human-readable event title.
    pub title: String,
    /// Free-text description, when the feed provides one.
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered category list; the first entry is the primary category.
    pub categories: Vec<CategoryRef>,
    /// Ordered location history; the first entry is the reference
    /// observation for filtering and aggregation.
    pub geometry: Vec<Geometry>,
    /// Root-level magnitude value, if any.
    #[serde(rename = "magnitudeValue", default)]
    pub magnitude_value: Option<MagnitudeScalar>,
    /// Unit for the root-level magnitude value, if any.
    #[serde(rename = "magnitudeUnit", default)]
    pub magnitude_unit: Option<String>,
}

impl Event {
    /// The primary category (first entry of the category list).
    pub fn primary_category(&self) -> Option<&CategoryRef> {
        self.categories.first()
    }

    /// The reference observation (first entry of the location history).
    pub fn first_geometry(&self) -> Option<&Geometry> {
        self.geometry.first()
    }
}
