//! Search input validation
//!
//! Runs before any network call. The zip code is not inspected here; only the
//! geocoding service can tell whether it names a real place.

use crate::error::ValidationError;
use crate::models::SearchRequest;

/// Exclusive lower bound of the search radius in miles
pub const RADIUS_LOWER_BOUND: u32 = 0;
/// Exclusive upper bound of the search radius in miles
pub const RADIUS_UPPER_BOUND: u32 = 200;

/// Validate raw form input into a [`SearchRequest`]
pub fn validate(radius_raw: &str, zipcode_raw: &str) -> Result<SearchRequest, ValidationError> {
    let radius = parse_radius(radius_raw).ok_or_else(|| ValidationError::InvalidRadius {
        raw: radius_raw.to_string(),
    })?;

    Ok(SearchRequest {
        zipcode: zipcode_raw.to_string(),
        radius,
    })
}

fn parse_radius(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // digits only, so the only parse failure left is overflow
    let radius: u32 = raw.parse().ok()?;
    (RADIUS_LOWER_BOUND < radius && radius < RADIUS_UPPER_BOUND).then_some(radius)
}
