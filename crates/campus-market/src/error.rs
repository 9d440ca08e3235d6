//! Marketplace error types.

use thiserror::Error;

use crate::catalog::ListingErrors;

/// Errors raised while building queries or listings.
///
/// Individual product records never produce errors: malformed fields are
/// treated as non-matching by the search predicates instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// Unrecognized sort mode identifier.
    #[error("Unknown sort mode: {0}")]
    UnknownSortMode(String),

    /// Unrecognized timeframe identifier.
    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),

    /// Unrecognized pagination mode identifier.
    #[error("Unknown pagination mode: {0}")]
    UnknownPaginationMode(String),

    /// Price bounds are negative or inverted.
    #[error("Invalid price range: min {min} is greater than max {max} or negative")]
    InvalidPriceRange { min: i64, max: i64 },

    /// Page size outside the accepted range.
    #[error("Invalid page size {0}: must be between 1 and {max}", max = crate::search::MAX_PAGE_SIZE)]
    InvalidPageSize(u32),

    /// A price string could not be parsed.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Listing draft failed validation.
    #[error("Listing is invalid: {0}")]
    InvalidListing(ListingErrors),
}

impl From<ListingErrors> for MarketError {
    fn from(errors: ListingErrors) -> Self {
        MarketError::InvalidListing(errors)
    }
}
