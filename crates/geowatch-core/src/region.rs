//! Latitude region-band classification.
//!
//! Maps a latitude in degrees to one of six named bands used by the
//! geographic facet of the analysis report. The display names are part
//! of the dashboard API contract.

use serde::{Deserialize, Serialize};

/// One of the six latitude bands used for geographic aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Latitudes above 66.5 degrees.
    Arctic,
    /// Latitudes in (23.5, 66.5].
    NorthernHemisphere,
    /// Latitudes in (0, 23.5].
    TropicsNorth,
    /// Latitudes in (-23.5, 0].
    TropicsSouth,
    /// Latitudes in (-66.5, -23.5].
    SouthernHemisphere,
    /// Latitudes at or below -66.5 degrees.
    Antarctic,
}

impl Region {
    /// Classify a latitude in degrees into its region band.
    ///
    /// Total over all inputs, including the poles and the exact band
    /// boundaries (each boundary belongs to the band below it).
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude > 66.5 {
            Self::Arctic
        } else if latitude > 23.5 {
            Self::NorthernHemisphere
        } else if latitude > 0.0 {
            Self::TropicsNorth
        } else if latitude > -23.5 {
            Self::TropicsSouth
        } else if latitude > -66.5 {
            Self::SouthernHemisphere
        } else {
            Self::Antarctic
        }
    }

    /// Display name used as the geographic facet's map key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arctic => "Arctic",
            Self::NorthernHemisphere => "Northern Hemisphere",
            Self::TropicsNorth => "Tropics (North)",
            Self::TropicsSouth => "Tropics (South)",
            Self::SouthernHemisphere => "Southern Hemisphere",
            Self::Antarctic => "Antarctic",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reference_latitudes() {
        assert_eq!(Region::from_latitude(70.0), Region::Arctic);
        assert_eq!(Region::from_latitude(45.0), Region::NorthernHemisphere);
        assert_eq!(Region::from_latitude(10.0), Region::TropicsNorth);
        assert_eq!(Region::from_latitude(-10.0), Region::TropicsSouth);
        assert_eq!(Region::from_latitude(-45.0), Region::SouthernHemisphere);
        assert_eq!(Region::from_latitude(-80.0), Region::Antarctic);
    }

    #[test]
    fn boundaries_belong_to_the_lower_band() {
        assert_eq!(Region::from_latitude(66.5), Region::NorthernHemisphere);
        assert_eq!(Region::from_latitude(23.5), Region::TropicsNorth);
        assert_eq!(Region::from_latitude(0.0), Region::TropicsSouth);
        assert_eq!(Region::from_latitude(-23.5), Region::SouthernHemisphere);
        assert_eq!(Region::from_latitude(-66.5), Region::Antarctic);
    }

    #[test]
    fn display_matches_dashboard_contract() {
        assert_eq!(Region::TropicsNorth.to_string(), "Tropics (North)");
        assert_eq!(Region::SouthernHemisphere.name(), "Southern Hemisphere");
    }
}
