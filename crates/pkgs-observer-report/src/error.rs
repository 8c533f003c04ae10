//! Error types for pkgs-observer-report

use thiserror::Error;

/// Result type alias using pkgs-observer-report's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Report assembly and delivery errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The package inventory could not be produced
    #[error("Failed to collect package inventory: {0}")]
    Inventory(#[from] pkgs_observer_core::Error),

    /// No ingest endpoint configured
    #[error("Ingest endpoint not set (use --endpoint or the INGEST_ENDPOINT environment variable)")]
    MissingEndpoint,

    /// Ingest endpoint is not a valid URL
    #[error("Invalid ingest endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Host identity could not be determined
    #[error("Could not determine {what}: {message}")]
    HostIdentity { what: &'static str, message: String },

    /// The request never got a response
    #[error("Failed to send report: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Ingest endpoint rejected the report with status {status}")]
    Rejected { status: u16 },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a host identity error
    pub fn host_identity(what: &'static str, message: impl Into<String>) -> Self {
        Self::HostIdentity {
            what,
            message: message.into(),
        }
    }
}
