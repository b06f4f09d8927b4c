use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use trailfinder::web::{self, AppState};
use trailfinder::{GoogleGeocoder, HikingProjectClient, TrailFinderConfig, TrailLookup};

fn init_tracing(config: &TrailFinderConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn http_client(config: &TrailFinderConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.http_timeout())
        .connect_timeout(config.http_timeout())
        .user_agent(&config.http.user_agent)
        .build()
        .with_context(|| "Failed to create HTTP client")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = TrailFinderConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config);
    tracing::info!(
        "Starting TrailFinder {} (max results {}, sort by {})",
        trailfinder::VERSION,
        config.trails.max_results,
        config.trails.sort
    );

    let client = http_client(&config)?;
    let geocoder = GoogleGeocoder::new(client.clone(), &config.geocoding);
    let trails = HikingProjectClient::new(client, &config.trails);
    let lookup = TrailLookup::new(geocoder, trails, &config.trails);
    let state = Arc::new(AppState::new(lookup, config.geocoding.api_key.clone()));

    web::run(&config, state).await
}
