//! Error types for the remote service clients.

use std::fmt;

use thiserror::Error;

/// Which remote service an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Board,
    RecordStore,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => f.write_str("board service"),
            Self::RecordStore => f.write_str("record store"),
        }
    }
}

/// Errors that can occur while talking to either remote service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// A configured base URL or identifier does not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A credential contains characters that cannot be sent in a header.
    #[error("invalid credential for {0}")]
    InvalidCredential(Service),

    /// Network request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The service rejected the credentials (HTTP 401).
    #[error("{service} rejected the credentials")]
    Unauthorized {
        /// Service that answered.
        service: Service,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("{service} resource not found: {resource}")]
    NotFound {
        /// Service that answered.
        service: Service,
        /// What was requested.
        resource: String,
    },

    /// Any other non-success HTTP status.
    #[error("{service} API error ({status}): {body}")]
    Status {
        /// Service that answered.
        service: Service,
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the service.
        body: String,
    },

    /// Failed to parse a JSON response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The base metadata does not list the configured table.
    #[error("table '{0}' not found in base metadata")]
    TableNotFound(String),
}

impl ClientError {
    /// Returns a short hint suitable for display next to the error.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidUrl(_) => "Check the base_url and identifiers in the configuration.",
            Self::InvalidCredential(_) | Self::Unauthorized { .. } => {
                "Check the API key and token for this service."
            }
            Self::Network(_) => "Could not reach the service. Check your network connection.",
            Self::NotFound { .. } | Self::TableNotFound(_) => {
                "Check the board, base and table identifiers in the configuration."
            }
            Self::Status { .. } | Self::JsonParse(_) => "The service returned an unexpected response.",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
