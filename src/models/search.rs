//! Per-request search models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{GeoLocation, TrailResult};

/// Validated user input for a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text zip code or address, forwarded to geocoding as is
    pub zipcode: String,
    /// Search radius in miles, always in `1..200`
    pub radius: u32,
}

/// Ordering requested from the trail-search service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Quality,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Distance => "distance",
            SortKey::Quality => "quality",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SortKey::Distance),
            "quality" => Ok(SortKey::Quality),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Parameters of one trail-search call
#[derive(Debug, Clone, PartialEq)]
pub struct TrailSearchParams {
    pub location: GeoLocation,
    /// Maximum distance from `location` in miles
    pub max_distance: u32,
    pub max_results: u32,
    pub sort: SortKey,
}

impl TrailSearchParams {
    /// Query pairs as sent to the trail-search service, without the API key
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.location.latitude.to_string()),
            ("lon", self.location.longitude.to_string()),
            ("maxDistance", self.max_distance.to_string()),
            ("maxResults", self.max_results.to_string()),
            ("sort", self.sort.to_string()),
        ]
    }
}

/// Everything the results page needs
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub radius: u32,
    pub location: GeoLocation,
    pub trails: Vec<TrailResult>,
    /// Trail-search body exactly as received
    pub raw_json: String,
    pub count: usize,
}
