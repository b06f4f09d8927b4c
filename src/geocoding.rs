//! Geocoding client for the Google Geocoding API
//!
//! Turns the free-text zip code or address a user typed into candidate
//! coordinates. An empty candidate list means "not found"; everything the
//! service refuses is reported as [`LookupError::Geocoding`].

use std::future::Future;
use std::time::Instant;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::LookupError;
use crate::models::{GeoLocation, GeocodingResult};

/// Anything that can resolve a free-text query to coordinates
pub trait Geocoder {
    /// Candidate matches for `query`, best first
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<GeocodingResult>, LookupError>> + Send;
}

/// Google Geocoding API client
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResponse {
    #[serde(default)]
    results: Vec<GoogleGeocodeResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResult {
    formatted_address: Option<String>,
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

impl From<GoogleGeocodeResult> for GeocodingResult {
    fn from(result: GoogleGeocodeResult) -> Self {
        GeocodingResult {
            formatted_address: result.formatted_address,
            location: GeoLocation::new(result.geometry.location.lat, result.geometry.location.lng),
        }
    }
}

impl GoogleGeocoder {
    /// Create a new client sharing `client`'s connection pool and timeout
    pub fn new(client: Client, config: &GeocodingConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl Geocoder for GoogleGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodingResult>, LookupError> {
        if query.trim().is_empty() {
            debug!("Blank geocoding query, skipping API call");
            return Ok(Vec::new());
        }

        let start_time = Instant::now();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Geocoding request failed: {}", e);
                LookupError::geocoding(format!("Request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding API returned HTTP {}", status);
            return Err(LookupError::geocoding(format!(
                "Geocoding API returned HTTP {status}"
            )));
        }

        let body: GoogleGeocodeResponse = response.json().await.map_err(|e| {
            LookupError::geocoding(format!("Invalid geocoding response: {}", e.without_url()))
        })?;

        let results: Vec<GeocodingResult> = match body.status.as_str() {
            "OK" => body.results.into_iter().map(GeocodingResult::from).collect(),
            "ZERO_RESULTS" => Vec::new(),
            other => {
                let detail = body.error_message.unwrap_or_default();
                warn!("Geocoding API refused request: {} {}", other, detail);
                return Err(LookupError::geocoding(
                    format!("{other} {detail}").trim_end().to_string(),
                ));
            }
        };

        if results.is_empty() {
            debug!("No results found for location '{}'", query);
        } else {
            info!(
                "Found {} geocoding results for '{}' in {:.3}s",
                results.len(),
                query,
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    fn geocoder(base_url: String) -> GoogleGeocoder {
        let config = GeocodingConfig {
            api_key: "gmaps-test-key".to_string(),
            base_url,
        };
        GoogleGeocoder::new(Client::new(), &config)
    }

    async fn serve_json(body: Value) -> String {
        let router = Router::new().route(
            "/geocode",
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        );
        format!("{}/geocode", serve(router).await)
    }

    #[tokio::test]
    async fn test_geocode_returns_candidates_in_order() {
        let url = serve_json(json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": "San Francisco, CA 94110, USA",
                    "geometry": { "location": { "lat": 37.75, "lng": -122.41 } }
                },
                {
                    "formatted_address": "Somewhere else",
                    "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
                }
            ]
        }))
        .await;

        let results = geocoder(url).geocode("94110").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].location, GeoLocation::new(37.75, -122.41));
        assert_eq!(
            results[0].formatted_address.as_deref(),
            Some("San Francisco, CA 94110, USA")
        );
    }

    #[tokio::test]
    async fn test_geocode_sends_address_and_key() {
        let router = Router::new().route(
            "/geocode",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let ok = params.get("address").map(String::as_str) == Some("94110 CA")
                    && params.get("key").map(String::as_str) == Some("gmaps-test-key");
                if ok {
                    Json(json!({ "status": "ZERO_RESULTS", "results": [] }))
                } else {
                    Json(json!({ "status": "INVALID_REQUEST", "results": [] }))
                }
            }),
        );
        let url = format!("{}/geocode", serve(router).await);

        let results = geocoder(url).geocode("94110 CA").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_zero_results_is_empty() {
        let url = serve_json(json!({ "status": "ZERO_RESULTS", "results": [] })).await;
        let results = geocoder(url).geocode("invalid-zip").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_skips_call() {
        // nothing listens here; a request would fail
        let results = geocoder("http://127.0.0.1:9/geocode".to_string())
            .geocode("   ")
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_denied_request_is_error() {
        let url = serve_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        }))
        .await;

        let err = geocoder(url).geocode("94110").await.unwrap_err();
        assert_eq!(
            err,
            LookupError::geocoding("REQUEST_DENIED The provided API key is invalid.")
        );
    }

    #[tokio::test]
    async fn test_http_failure_is_error() {
        let router = Router::new().route(
            "/geocode",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let url = format!("{}/geocode", serve(router).await);

        let err = geocoder(url).geocode("94110").await.unwrap_err();
        assert!(matches!(err, LookupError::Geocoding { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_error_does_not_leak_api_key() {
        let err = geocoder("http://127.0.0.1:9/geocode".to_string())
            .geocode("94110")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Geocoding { .. }));
        assert!(!err.to_string().contains("gmaps-test-key"));
    }
}
