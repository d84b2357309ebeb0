//! Domain errors for report generation.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single call to the platform API.
///
/// Adapters collapse their transport-specific errors into these kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Platform unreachable: {0}")]
    Transport(String),

    #[error("Platform rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Malformed platform response: {0}")]
    MalformedResponse(String),
}

impl PlatformError {
    /// True for network and authentication failures, false for bad payloads.
    pub fn is_transport_or_auth(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Unauthorized(_))
    }
}

/// Failure of a whole report operation. No partial report accompanies it.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Listing applications failed: {0}")]
    Listing(#[source] PlatformError),

    #[error("Resolving placement for application {app} ({guid}) failed: {source}")]
    Resolution {
        app: String,
        guid: String,
        #[source]
        source: PlatformError,
    },

    #[error("Report generation was cancelled")]
    Cancelled,

    #[error("Report generation exceeded {}s", .0.as_secs())]
    TimedOut(Duration),
}

impl ReportError {
    /// The underlying platform failure, if the report failed on a remote call.
    pub fn platform_error(&self) -> Option<&PlatformError> {
        match self {
            Self::Listing(source) | Self::Resolution { source, .. } => Some(source),
            Self::Cancelled | Self::TimedOut(_) => None,
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
