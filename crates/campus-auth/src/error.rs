//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// A user is already signed in on this session.
    #[error("already signed in as {0}")]
    AlreadySignedIn(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::NotSignedIn | AuthError::SessionExpired)
    }
}
