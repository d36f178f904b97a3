//! Error types for the admin client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by [`crate::AdminClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or timeout
    #[error("admin request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The admin service answered with a non-success status other than 404
    #[error("admin service returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The response body did not hold valid attributes
    #[error("unexpected admin response: {0}")]
    ParseError(String),

    /// Nothing is stored at the requested URL
    #[error("no attributes at {0}")]
    NotFound(String),

    /// The request could not be built, e.g. an unusable base URL
    #[error("invalid admin request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Whether the remote side reported absence
    ///
    /// The update protocol treats this as an empty baseline.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
