//! Store access error types.

use std::time::Duration;

use campus_market::catalog::ListingErrors;
use thiserror::Error;

/// Errors that can occur when calling the data store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request error: {0}")]
    Request(String),

    /// Could not reach the store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error status returned by the store.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The call did not finish in time.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Failed to parse the response body.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The call needs a signed-in user.
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    /// The listing failed validation.
    #[error("Invalid listing: {0}")]
    InvalidListing(ListingErrors),
}

impl FetchError {
    /// Whether repeating the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout(_) | FetchError::Connection(_) => true,
            FetchError::Http { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }

    /// HTTP status, if the store answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

impl From<ListingErrors> for FetchError {
    fn from(errors: ListingErrors) -> Self {
        FetchError::InvalidListing(errors)
    }
}

/// Result type for store calls.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(FetchError::Timeout(Duration::from_millis(10)).is_retryable());
        assert!(FetchError::Connection("reset".into()).is_retryable());
        assert!(FetchError::Http { status: 503, message: "unavailable".into() }.is_retryable());
        assert!(!FetchError::Http { status: 404, message: "missing".into() }.is_retryable());
        assert!(!FetchError::Unauthenticated.is_retryable());
    }

    #[test]
    fn test_json_error_converts() {
        let err: FetchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }
}
