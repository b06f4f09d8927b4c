//! Trail lookup orchestration
//!
//! Resolves a validated [`SearchRequest`] in two strictly sequential steps:
//! geocode the zip code, then search trails around the first match. Any
//! failure ends the lookup; nothing is retried and no partial result is
//! returned.

use tracing::{debug, info, instrument};

use crate::config::TrailsConfig;
use crate::error::{LookupError, TrailFinderError};
use crate::geocoding::Geocoder;
use crate::models::{GeoLocation, SearchRequest, SearchResponse, SortKey, TrailSearchParams};
use crate::trails::TrailSearch;
use crate::validation::validate;

/// Geocoding and trail search wired together
pub struct TrailLookup<G, T> {
    geocoder: G,
    trails: T,
    max_results: u32,
    sort: SortKey,
}

impl<G, T> TrailLookup<G, T>
where
    G: Geocoder + Sync,
    T: TrailSearch + Sync,
{
    pub fn new(geocoder: G, trails: T, config: &TrailsConfig) -> Self {
        Self {
            geocoder,
            trails,
            max_results: config.max_results,
            sort: config.sort,
        }
    }

    /// Parameters for the trail-search call around `location`
    #[must_use]
    pub fn search_params(&self, location: GeoLocation, radius: u32) -> TrailSearchParams {
        TrailSearchParams {
            location,
            max_distance: radius,
            max_results: self.max_results,
            sort: self.sort,
        }
    }

    /// Validate raw input and run the lookup
    pub async fn search(
        &self,
        radius_raw: &str,
        zipcode_raw: &str,
    ) -> Result<SearchResponse, TrailFinderError> {
        let request = validate(radius_raw, zipcode_raw)?;
        Ok(self.lookup(request).await?)
    }

    /// Geocode the request's zip code and list trails around the first match
    #[instrument(skip(self, request), fields(zipcode = %request.zipcode, radius = request.radius))]
    pub async fn lookup(&self, request: SearchRequest) -> Result<SearchResponse, LookupError> {
        let candidates = self.geocoder.geocode(&request.zipcode).await?;

        // first match only, there is no disambiguation step
        let Some(first) = candidates.into_iter().next() else {
            debug!("No geocoding match for '{}'", request.zipcode);
            return Err(LookupError::invalid_location(request.zipcode));
        };
        let location = GeoLocation::from(first);
        debug!("Resolved '{}' to {}", request.zipcode, location.format_coordinates());

        let params = self.search_params(location, request.radius);
        let reply = self.trails.search(&params).await?;

        let count = reply.payload.trails.len();
        info!("Lookup found {} trails within {} miles", count, request.radius);

        Ok(SearchResponse {
            radius: request.radius,
            location,
            trails: reply.payload.trails,
            raw_json: reply.raw,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::{GeocodingResult, TrailResult, TrailSearchReply};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGeocoder {
        results: Vec<GeocodingResult>,
        calls: AtomicUsize,
    }

    impl StubGeocoder {
        fn with(locations: &[(f64, f64)]) -> Self {
            Self {
                results: locations
                    .iter()
                    .map(|&(lat, lng)| GeocodingResult {
                        formatted_address: None,
                        location: GeoLocation::new(lat, lng),
                    })
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _query: &str) -> Result<Vec<GeocodingResult>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    struct StubTrails {
        reply: Result<String, LookupError>,
        seen: Mutex<Vec<TrailSearchParams>>,
    }

    impl StubTrails {
        fn ok(raw: String) -> Self {
            Self {
                reply: Ok(raw),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: LookupError) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl TrailSearch for StubTrails {
        async fn search(&self, params: &TrailSearchParams) -> Result<TrailSearchReply, LookupError> {
            self.seen.lock().unwrap().push(params.clone());
            let raw = self.reply.clone()?;
            TrailSearchReply::parse(raw).map_err(|e| LookupError::malformed(e.to_string()))
        }
    }

    fn trails_json(count: usize) -> String {
        let trails: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":{i},"name":"Trail {i}","difficulty":"green","length":{}.5,"conditionStatus":"All Clear","stars":4}}"#,
                    i + 1
                )
            })
            .collect();
        format!(r#"{{"trails":[{}],"success":1}}"#, trails.join(","))
    }

    fn lookup_with(
        geocoder: StubGeocoder,
        trails: StubTrails,
    ) -> TrailLookup<StubGeocoder, StubTrails> {
        let config = TrailsConfig {
            api_key: "rei".to_string(),
            base_url: "http://localhost".to_string(),
            max_results: 5,
            sort: SortKey::Distance,
        };
        TrailLookup::new(geocoder, trails, &config)
    }

    fn request(zipcode: &str, radius: u32) -> SearchRequest {
        SearchRequest {
            zipcode: zipcode.to_string(),
            radius,
        }
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let raw = trails_json(5);
        let lookup = lookup_with(
            StubGeocoder::with(&[(37.75, -122.41)]),
            StubTrails::ok(raw.clone()),
        );

        let response = lookup.lookup(request("94110", 50)).await.unwrap();

        assert_eq!(response.count, 5);
        assert_eq!(response.trails.len(), 5);
        assert_eq!(response.location, GeoLocation::new(37.75, -122.41));
        assert_eq!(response.radius, 50);
        assert_eq!(response.raw_json, raw);
    }

    #[tokio::test]
    async fn test_lookup_preserves_records() {
        let raw = trails_json(3);
        let lookup = lookup_with(StubGeocoder::with(&[(1.0, 2.0)]), StubTrails::ok(raw.clone()));

        let response = lookup.lookup(request("94110", 10)).await.unwrap();

        let expected: Vec<TrailResult> = serde_json::from_str::<serde_json::Value>(&raw)
            .map(|v| serde_json::from_value(v["trails"].clone()).unwrap())
            .unwrap();
        assert_eq!(response.trails, expected);
        assert_eq!(response.trails[2].name(), "Trail 2");
        assert_eq!(response.trails[2].length(), Some(3.5));
        assert_eq!(
            response.trails[2].get("stars"),
            Some(&serde_json::json!(4))
        );
    }

    #[tokio::test]
    async fn test_lookup_counts_records_with_null_fields() {
        let raw = r#"{"trails":[{"id":1,"name":null},{"id":2,"name":"B","length":"3.2","conditionDetails":null}],"success":1}"#;
        let lookup = lookup_with(
            StubGeocoder::with(&[(1.0, 2.0)]),
            StubTrails::ok(raw.to_string()),
        );

        let response = lookup.lookup(request("94110", 10)).await.unwrap();

        assert_eq!(response.count, 2);
        assert_eq!(response.trails[0].name(), "");
        assert_eq!(response.trails[1].length(), Some(3.2));
        let expected: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(
            serde_json::to_value(&response.trails).unwrap(),
            expected["trails"]
        );
    }

    #[tokio::test]
    async fn test_uses_first_candidate_and_fixed_result_count() {
        let trails = StubTrails::ok(trails_json(1));
        let lookup = lookup_with(
            StubGeocoder::with(&[(37.75, -122.41), (40.0, -70.0)]),
            trails,
        );

        lookup.lookup(request("94110", 150)).await.unwrap();

        let seen = lookup.trails.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[TrailSearchParams {
                location: GeoLocation::new(37.75, -122.41),
                max_distance: 150,
                max_results: 5,
                sort: SortKey::Distance,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_geocode_is_invalid_location() {
        let lookup = lookup_with(StubGeocoder::with(&[]), StubTrails::ok(trails_json(5)));

        let err = lookup.lookup(request("invalid-zip", 50)).await.unwrap_err();

        assert_eq!(err, LookupError::invalid_location("invalid-zip"));
        assert_eq!(lookup.trails.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_no_trails() {
        let upstream = LookupError::upstream(Some(503), "HTTP 503 Service Unavailable");
        let lookup = lookup_with(
            StubGeocoder::with(&[(37.75, -122.41)]),
            StubTrails::failing(upstream.clone()),
        );

        let err = lookup.lookup(request("94110", 50)).await.unwrap_err();

        assert_eq!(err, upstream);
        assert_eq!(lookup.trails.calls(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_idempotent() {
        let lookup = lookup_with(
            StubGeocoder::with(&[(37.75, -122.41)]),
            StubTrails::ok(trails_json(4)),
        );

        let first = lookup.lookup(request("94110", 50)).await.unwrap();
        let second = lookup.lookup(request("94110", 50)).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_search_rejects_radius_before_any_call() {
        let lookup = lookup_with(
            StubGeocoder::with(&[(37.75, -122.41)]),
            StubTrails::ok(trails_json(5)),
        );

        let err = lookup.search("250", "94110").await.unwrap_err();

        assert!(matches!(
            err,
            TrailFinderError::Validation(ValidationError::InvalidRadius { .. })
        ));
        assert_eq!(lookup.geocoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(lookup.trails.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_invalid_zip_skips_trail_search() {
        let lookup = lookup_with(StubGeocoder::with(&[]), StubTrails::ok(trails_json(5)));

        let err = lookup.search("50", "invalid-zip").await.unwrap_err();

        assert!(matches!(
            err,
            TrailFinderError::Lookup(LookupError::InvalidLocation { .. })
        ));
        assert_eq!(lookup.geocoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.trails.calls(), 0);
    }
}
