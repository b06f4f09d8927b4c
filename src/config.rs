//! Configuration management for the `TrailFinder` application
//!
//! Configuration is read once from the process environment at startup and
//! validated. The resulting struct is immutable and handed explicitly to the
//! components that need it.

use crate::TrailFinderError;
use crate::models::SortKey;
use anyhow::{Context, Result};
use std::fmt;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const GMAPS_API_KEY: &str = "GMAPS_API_KEY";
pub const REI_API_KEY: &str = "REI_API_KEY";
const ENV_PREFIX: &str = "TRAILFINDER_";

/// Root configuration structure for the `TrailFinder` application
#[derive(Debug, Clone)]
pub struct TrailFinderConfig {
    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,
    /// Trail-search API configuration
    pub trails: TrailsConfig,
    /// Outbound HTTP client settings
    pub http: HttpConfig,
    /// Web server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Geocoding API configuration settings
#[derive(Clone)]
pub struct GeocodingConfig {
    /// Google Maps API key, also handed to the browser map
    pub api_key: String,
    /// Geocoding endpoint
    pub base_url: String,
}

/// Trail-search API configuration settings
#[derive(Clone)]
pub struct TrailsConfig {
    /// Hiking Project API key
    pub api_key: String,
    /// Trail-search endpoint
    pub base_url: String,
    /// Number of trails requested per search
    pub max_results: u32,
    /// Result ordering
    pub sort: SortKey,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Timeout for each outbound request in seconds
    pub timeout_seconds: u32,
    pub user_agent: String,
}

/// Web server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for paths no route matches
    pub static_dir: String,
    /// Upper bound for handling one inbound request in seconds
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
}

impl fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for TrailsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .field("sort", &self.sort)
            .finish()
    }
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_trails_base_url() -> String {
    "https://www.hikingproject.com/data/get-trails".to_string()
}

fn default_max_results() -> u32 {
    5
}

fn default_http_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("TrailFinder/{}", crate::VERSION)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TrailFinderConfig {
    fn default() -> Self {
        Self {
            geocoding: GeocodingConfig {
                api_key: String::new(),
                base_url: default_geocoding_base_url(),
            },
            trails: TrailsConfig {
                api_key: String::new(),
                base_url: default_trails_base_url(),
                max_results: default_max_results(),
                sort: SortKey::default(),
            },
            http: HttpConfig {
                timeout_seconds: default_http_timeout(),
                user_agent: default_user_agent(),
            },
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                static_dir: default_static_dir(),
                request_timeout_seconds: default_request_timeout(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

impl TrailFinderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .ok_or_else(|| TrailFinderError::config(format!("Missing {key} env var")))
        };
        let optional = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        let mut config = Self::default();
        config.geocoding.api_key = required(GMAPS_API_KEY)?;
        config.trails.api_key = required(REI_API_KEY)?;

        if let Some(url) = optional("GEOCODING_URL") {
            config.geocoding.base_url = url;
        }
        if let Some(url) = optional("TRAILS_URL") {
            config.trails.base_url = url;
        }
        if let Some(value) = optional("MAX_RESULTS") {
            config.trails.max_results = parse_value("MAX_RESULTS", &value)?;
        }
        if let Some(value) = optional("SORT") {
            config.trails.sort = value
                .parse()
                .map_err(|e: String| TrailFinderError::config(e))
                .with_context(|| format!("Invalid {ENV_PREFIX}SORT"))?;
        }
        if let Some(value) = optional("HTTP_TIMEOUT_SECONDS") {
            config.http.timeout_seconds = parse_value("HTTP_TIMEOUT_SECONDS", &value)?;
        }
        if let Some(value) = optional("REQUEST_TIMEOUT_SECONDS") {
            config.server.request_timeout_seconds =
                parse_value("REQUEST_TIMEOUT_SECONDS", &value)?;
        }
        if let Some(host) = optional("HOST") {
            config.server.host = host;
        }
        if let Some(value) = optional("PORT") {
            config.server.port = parse_value("PORT", &value)?;
        }
        if let Some(dir) = optional("STATIC_DIR") {
            config.server.static_dir = dir;
        }
        if let Some(level) = optional("LOG_LEVEL") {
            config.logging.level = level.to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.geocoding.api_key.trim().is_empty() {
            return Err(TrailFinderError::config(format!("{GMAPS_API_KEY} cannot be empty")).into());
        }

        if self.trails.api_key.trim().is_empty() {
            return Err(TrailFinderError::config(format!("{REI_API_KEY} cannot be empty")).into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=300).contains(&self.http.timeout_seconds) {
            return Err(TrailFinderError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if !(1..=300).contains(&self.server.request_timeout_seconds) {
            return Err(TrailFinderError::config(
                "Request timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if !(1..=500).contains(&self.trails.max_results) {
            return Err(TrailFinderError::config("Max results must be between 1 and 500").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TrailFinderError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Trails", &self.trails.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TrailFinderError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Timeout applied to each outbound request
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds.into())
    }

    /// Timeout applied to each inbound request
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds.into())
    }

    /// Address the web server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid bind address {}:{}",
                    self.server.host, self.server.port
                )
            })
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {ENV_PREFIX}{name}: '{value}'"))
}
