//! Browse page settings.

use std::time::Duration;

use campus_market::prelude::*;
use campus_market::search::{DEFAULT_PAGE_SIZE, DEFAULT_PRICE_CEILING, PAGE_SIZE_OPTIONS};
use serde::{Deserialize, Serialize};

use crate::BrowseError;

/// Settings for the search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Results per page.
    pub page_size: u32,
    pub pagination: PaginationMode,
    /// Settle delay before a fetch is sent, in milliseconds.
    pub debounce_ms: u64,
    /// Candidates requested from the store per call. A fetch reads
    /// batches of this size until the store has no more.
    pub candidate_limit: usize,
    /// Top of the price slider, in major units. Ranges reaching it count as
    /// no price filter.
    pub price_ceiling: i64,
    /// Pages shown either side of the current one in the page selector.
    pub visible_page_delta: u32,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            pagination: PaginationMode::Paged,
            debounce_ms: 300,
            candidate_limit: 200,
            price_ceiling: DEFAULT_PRICE_CEILING,
            visible_page_delta: 2,
        }
    }
}

impl BrowseConfig {
    /// Check values that would make the page unusable.
    pub fn validate(&self) -> Result<(), BrowseError> {
        Pager::try_new(self.page_size, self.pagination)?;
        if self.candidate_limit == 0 {
            return Err(BrowseError::InvalidSetting(
                "candidate_limit must be at least 1".to_string(),
            ));
        }
        if self.price_ceiling < 0 {
            let ceiling = Money::from_major(self.price_ceiling, Currency::default());
            return Err(MarketError::InvalidPriceRange {
                min: 0,
                max: ceiling.amount_minor,
            }
            .into());
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Whether the page size is one the selector offers.
    pub fn is_standard_page_size(&self) -> bool {
        PAGE_SIZE_OPTIONS.contains(&self.page_size)
    }

    /// The query a fresh page starts from.
    pub fn base_query(&self) -> Query {
        let mut pager = Pager::new(self.page_size);
        pager.mode = self.pagination;
        Query::new()
            .with_price_ceiling(PriceRange::up_to(self.price_ceiling, Currency::default()))
            .with_pager(pager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowseConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_standard_page_size());
        assert_eq!(config.debounce(), Duration::from_millis(300));

        let query = config.base_query();
        assert_eq!(query.pager.page_size, 24);
        assert_eq!(query.active_filter_count(), 0);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: BrowseConfig =
            serde_json::from_str(r#"{"page_size": 48, "pagination": "infinite"}"#).unwrap();
        assert_eq!(config.page_size, 48);
        assert_eq!(config.pagination, PaginationMode::Infinite);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero = BrowseConfig { page_size: 0, ..BrowseConfig::default() };
        assert!(matches!(zero.validate(), Err(BrowseError::Market(MarketError::InvalidPageSize(0)))));

        let negative = BrowseConfig { price_ceiling: -5, ..BrowseConfig::default() };
        assert!(negative.validate().is_err());

        let no_batch = BrowseConfig { candidate_limit: 0, ..BrowseConfig::default() };
        assert!(matches!(no_batch.validate(), Err(BrowseError::InvalidSetting(_))));
    }

    #[test]
    fn test_base_query_price_range_is_open() {
        let config = BrowseConfig { price_ceiling: 1000, ..BrowseConfig::default() };
        let query = config.base_query();
        assert!(query.price_range.is_open_ended());
        assert_eq!(query.default_price_range.max, Money::from_major(1000, Currency::INR));
        assert!(query.price_range.contains(Money::from_major(65_000, Currency::INR)));
        assert_eq!(query.active_filter_count(), 0);
    }
}
