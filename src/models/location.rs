//! Location model for geographic coordinates and geocoding candidates

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One candidate match returned by the geocoding service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodingResult {
    /// Human readable address as reported by the service
    pub formatted_address: Option<String>,
    /// Coordinates of the match
    pub location: GeoLocation,
}

impl From<GeocodingResult> for GeoLocation {
    fn from(result: GeocodingResult) -> Self {
        result.location
    }
}
