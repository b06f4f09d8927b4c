//! Data models for the TrailFinder application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates produced by geocoding
//! - Trail: Trail records and the difficulty lookup table
//! - Search: Per-request search inputs, outbound parameters and results

pub mod location;
pub mod search;
pub mod trail;

// Re-export all public types for convenient access
pub use location::{GeoLocation, GeocodingResult};
pub use search::{SearchRequest, SearchResponse, SortKey, TrailSearchParams};
pub use trail::{Difficulty, TrailResult, TrailSearchPayload, TrailSearchReply, difficulty_label};
