use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::PlatformError;

/// Errors that can occur when talking to the Cloud Foundry API or its login server
#[derive(Error, Debug)]
pub enum CfApiError {
    /// Bad credentials or expired token (HTTP 401)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Platform rate limit hit (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,

    /// Server error from the platform (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    /// The API root document does not advertise a login server
    #[error("API root at {0} does not advertise a login or uaa link")]
    LoginDiscovery(String),

    /// Credentials or endpoint cannot be turned into a request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown or unexpected status
    #[error("Unexpected status ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl CfApiError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(body),
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            status if status.is_server_error() => Self::ServerError(status, body),
            status => Self::UnknownError(status, body),
        }
    }

    /// Returns true if the platform refused the caller rather than failing
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }
}

impl From<CfApiError> for PlatformError {
    fn from(err: CfApiError) -> Self {
        match err {
            CfApiError::Malformed { .. } => Self::MalformedResponse(err.to_string()),
            CfApiError::NetworkError(ref source) if source.is_decode() => {
                Self::MalformedResponse(err.to_string())
            }
            CfApiError::Unauthorized(_) | CfApiError::Forbidden(_) => {
                Self::Unauthorized(err.to_string())
            }
            _ => Self::Transport(err.to_string()),
        }
    }
}
