//! Coordinate model for geographic positions

use serde::{Deserialize, Serialize};

use crate::{Result, SkateFinderError};

/// A WGS84 position in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, within [-90, 90]
    pub lat: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    ///
    /// Intended for trusted constants such as catalog entries.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        let coordinate = Self { lat, lng };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(SkateFinderError::invalid_input(format!(
                "coordinates out of range: lat={lat}, lng={lng}"
            )))
        }
    }

    /// Whether both components are finite and inside their ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Format as a `"lat, lng"` label with four decimals
    #[must_use]
    pub fn format_label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }

    /// Convert to the `haversine` crate's location type
    #[must_use]
    pub fn to_haversine(&self) -> haversine::Location {
        haversine::Location {
            latitude: self.lat,
            longitude: self.lng,
        }
    }
}
