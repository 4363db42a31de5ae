//! Error types and handling for the skatefinder search pipeline

use thiserror::Error;

/// Main error type for the skatefinder library
#[derive(Error, Debug)]
pub enum SkateFinderError {
    /// Empty or malformed user input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The platform offers no way to obtain the current position
    #[error("Location capability unsupported: {message}")]
    UnsupportedCapability { message: String },

    /// The position source refused or failed to answer
    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    /// A geocoding, venue or weather service failed
    #[error("{provider} provider error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// One of the concurrent per-venue weather fetches failed
    #[error("Enrichment failed for '{venue}': {message}")]
    AggregateEnrichmentFailure { venue: String, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The run was superseded by a newer search
    #[error("Search cancelled: a newer search was started")]
    Cancelled,

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkateFinderError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new unsupported capability error
    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedCapability {
            message: message.into(),
        }
    }

    /// Create a new location unavailable error
    pub fn location_unavailable<S: Into<String>>(reason: S) -> Self {
        Self::LocationUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    /// Wrap a failed weather fetch into the aggregate enrichment failure
    pub fn enrichment<S: Into<String>>(venue: S, cause: &SkateFinderError) -> Self {
        Self::AggregateEnrichmentFailure {
            venue: venue.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the run stopped because a newer run replaced it
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkateFinderError::InvalidInput { .. } => "Please enter a location".to_string(),
            SkateFinderError::UnsupportedCapability { .. } => {
                "Geolocation is not supported on this device".to_string()
            }
            SkateFinderError::LocationUnavailable { reason } => {
                format!("Unable to get your location: {reason}")
            }
            SkateFinderError::Provider { .. } | SkateFinderError::AggregateEnrichmentFailure { .. } => {
                format!("Error finding skateparks: {self}")
            }
            SkateFinderError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SkateFinderError::Cancelled => "Search cancelled".to_string(),
            SkateFinderError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
