//! Browse errors.

use campus_auth::AuthError;
use campus_data::FetchError;
use campus_market::MarketError;
use thiserror::Error;

/// Errors surfaced by page controllers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrowseError {
    /// The store call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Invalid query or configuration value.
    #[error(transparent)]
    Market(#[from] MarketError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A page setting outside its usable range.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

impl BrowseError {
    /// Whether a manual retry makes sense.
    pub fn is_retryable(&self) -> bool {
        match self {
            BrowseError::Fetch(e) => e.is_retryable(),
            _ => false,
        }
    }
}
