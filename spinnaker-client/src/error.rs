//! Error types for the Spinnaker client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Spinnaker client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("spinnaker api responded with status code: {status}, body: {body}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("failed to decode spinnaker api response: {0}")]
    DecodeError(String),

    /// Application, pipeline or execution does not exist
    #[error("{0}")]
    NotFound(String),

    /// Client certificate or key could not be loaded
    #[error("invalid client certificate or key: {0}")]
    InvalidIdentity(String),
}

impl ClientError {
    /// Create an API error from status code and body
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}
