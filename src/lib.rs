//! `TrailFinder` - find hiking trails near a zip code
//!
//! This library validates search input, geocodes the zip code, queries the
//! trail-search service around the match and renders the result page.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod lookup;
pub mod models;
pub mod trails;
pub mod validation;
pub mod web;

#[cfg(test)]
mod test_support;

// Re-export core types for public API
pub use config::TrailFinderConfig;
pub use error::{LookupError, TrailFinderError, ValidationError};
pub use geocoding::{Geocoder, GoogleGeocoder};
pub use lookup::TrailLookup;
pub use models::{GeoLocation, SearchRequest, SearchResponse, TrailResult, TrailSearchParams};
pub use trails::{HikingProjectClient, TrailSearch};
pub use validation::validate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TrailFinderError>;
