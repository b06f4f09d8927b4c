//! Error types and handling for the `TrailFinder` application

use thiserror::Error;

/// Rejected search input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Radius is not a whole number strictly between 0 and 200
    #[error("Invalid radius: '{raw}'")]
    InvalidRadius { raw: String },
}

impl ValidationError {
    /// Notice shown on the search form
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::InvalidRadius { .. } => {
                "Please enter a distance less than 200 miles".to_string()
            }
        }
    }
}

/// Failure while resolving a search against the external services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Geocoding found no match for the query
    #[error("No location found for '{query}'")]
    InvalidLocation { query: String },

    /// Geocoding service refused or failed the request
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// Trail-search service returned a failure status or could not be reached
    #[error("Trail service error: {detail}")]
    Upstream { status: Option<u16>, detail: String },

    /// Trail-search service answered with a body we cannot read
    #[error("Malformed trail service response: {message}")]
    MalformedResponse { message: String },
}

impl LookupError {
    /// Create a new invalid location error
    pub fn invalid_location<S: Into<String>>(query: S) -> Self {
        Self::InvalidLocation {
            query: query.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(status: Option<u16>, detail: S) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Whether the user can fix this by changing the input
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, LookupError::InvalidLocation { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LookupError::InvalidLocation { .. } => {
                "Please enter a valid address or zipcode".to_string()
            }
            LookupError::Geocoding { .. } => {
                "The location service is unavailable right now. Please try again later."
                    .to_string()
            }
            LookupError::Upstream { .. } | LookupError::MalformedResponse { .. } => {
                "The trail service could not complete your search.".to_string()
            }
        }
    }
}

/// Main error type for the `TrailFinder` application
#[derive(Error, Debug)]
pub enum TrailFinderError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// External lookup errors
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TrailFinderError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TrailFinderError::Config { .. } => {
                "Configuration error. Please check your environment and API keys.".to_string()
            }
            TrailFinderError::Validation(err) => err.user_message(),
            TrailFinderError::Lookup(err) => err.user_message(),
            TrailFinderError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
