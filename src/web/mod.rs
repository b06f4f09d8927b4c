//! HTTP front end: search form, search endpoint and static files

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::config::TrailFinderConfig;
use crate::error::TrailFinderError;
use crate::geocoding::Geocoder;
use crate::lookup::TrailLookup;
use crate::trails::TrailSearch;

pub mod view;

/// Shared, read-only state of the web server
pub struct AppState<G, T> {
    pub lookup: TrailLookup<G, T>,
    /// Key the browser uses to load the map
    pub maps_api_key: String,
}

impl<G, T> AppState<G, T> {
    pub fn new(lookup: TrailLookup<G, T>, maps_api_key: String) -> Self {
        Self {
            lookup,
            maps_api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndexParams {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    radius: Option<String>,
    zipcode: Option<String>,
}

pub fn router<G, T>(state: Arc<AppState<G, T>>, config: &TrailFinderConfig) -> Router
where
    G: Geocoder + Send + Sync + 'static,
    T: TrailSearch + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/show-trails", get(show_trails::<G, T>))
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run<G, T>(config: &TrailFinderConfig, state: Arc<AppState<G, T>>) -> Result<()>
where
    G: Geocoder + Send + Sync + 'static,
    T: TrailSearch + Send + Sync + 'static,
{
    let app = router(state, config);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}

async fn index(Query(params): Query<IndexParams>) -> Html<String> {
    Html(view::homepage(params.message.as_deref()).into_string())
}

async fn show_trails<G, T>(
    State(state): State<Arc<AppState<G, T>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    G: Geocoder + Send + Sync + 'static,
    T: TrailSearch + Send + Sync + 'static,
{
    let radius = params.radius.unwrap_or_default();
    let zipcode = params.zipcode.unwrap_or_default();

    match state.lookup.search(&radius, &zipcode).await {
        Ok(response) => {
            Html(view::show_trails(&response, &state.maps_api_key).into_string()).into_response()
        }
        Err(TrailFinderError::Validation(err)) => {
            debug!("Rejected search input: {}", err);
            redirect_with_message(&err.user_message())
        }
        Err(TrailFinderError::Lookup(err)) if err.is_user_error() => {
            debug!("Search location not found: {}", err);
            redirect_with_message(&err.user_message())
        }
        Err(err) => {
            warn!("Trail search failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Html(view::error_page(&err).into_string()),
            )
                .into_response()
        }
    }
}

/// Send the user back to the search form with a notice
fn redirect_with_message(message: &str) -> Response {
    Redirect::to(&format!("/?message={}", urlencoding::encode(message))).into_response()
}
