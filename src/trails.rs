//! Trail-search client for the Hiking Project `get-trails` API

use std::future::Future;
use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::TrailsConfig;
use crate::error::LookupError;
use crate::models::{TrailSearchParams, TrailSearchReply};

/// Longest slice of an error body carried into [`LookupError::Upstream`]
const MAX_ERROR_BODY: usize = 500;

/// Anything that can list trails around a location
pub trait TrailSearch {
    fn search(
        &self,
        params: &TrailSearchParams,
    ) -> impl Future<Output = Result<TrailSearchReply, LookupError>> + Send;
}

/// Hiking Project API client
pub struct HikingProjectClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HikingProjectClient {
    /// Create a new client sharing `client`'s connection pool and timeout
    pub fn new(client: Client, config: &TrailsConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl TrailSearch for HikingProjectClient {
    #[instrument(skip(self, params), fields(lat = params.location.latitude, lon = params.location.longitude, max_distance = params.max_distance))]
    async fn search(&self, params: &TrailSearchParams) -> Result<TrailSearchReply, LookupError> {
        let start_time = Instant::now();

        let mut query = params.query_pairs();
        query.insert(0, ("key", self.api_key.clone()));

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Trail API request failed: {}", e);
                LookupError::upstream(None, format!("Trail API request failed: {e}"))
            })?;

        let status = response.status();
        debug!("Trail API responded with {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read trail API error body: {}", e.without_url());
                    String::new()
                }
            };
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            let mut detail = format!("HTTP {} {}", status.as_u16(), reason);
            let body = body.trim();
            if !body.is_empty() {
                detail.push_str(": ");
                detail.extend(body.chars().take(MAX_ERROR_BODY));
            }

            warn!("Trail API error: {}", detail);
            return Err(LookupError::upstream(Some(status.as_u16()), detail));
        }

        let raw = response.text().await.map_err(|e| {
            LookupError::upstream(
                Some(status.as_u16()),
                format!("Failed to read trail API response: {}", e.without_url()),
            )
        })?;

        let reply = TrailSearchReply::parse(raw).map_err(|e| {
            warn!("Failed to parse trail API response: {}", e);
            LookupError::malformed(e.to_string())
        })?;

        info!(
            "Found {} trails in {:.3}s",
            reply.payload.trails.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(reply)
    }
}
