//! Request and response shapes for store calls.

use std::collections::BTreeMap;

use campus_market::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of products requested per fetch.
pub const DEFAULT_FETCH_LIMIT: usize = 50;

/// Parameters of a product listing fetch.
///
/// Carries the search and sort intent through to the store. Price,
/// condition and recency filters stay on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductFetch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub sort: SortMode,
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for ProductFetch {
    fn default() -> Self {
        Self {
            search_query: None,
            category: CategoryFilter::All,
            sort: SortMode::Relevance,
            limit: DEFAULT_FETCH_LIMIT,
            offset: 0,
        }
    }
}

impl ProductFetch {
    /// Derive the fetch for `query`: the first batch of `limit` candidates
    /// from the start.
    pub fn from_query(query: &Query, limit: usize) -> Self {
        Self {
            search_query: query.text().map(str::to_string),
            category: query.category.clone(),
            sort: query.sort,
            limit,
            offset: 0,
        }
    }

    /// The same fetch, starting where this one's rows end.
    pub fn next_batch(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self.clone()
        }
    }

    /// Whether `received` rows mean the store has nothing past this batch.
    pub fn is_last_batch(&self, received: usize) -> bool {
        received == 0 || received < self.limit
    }

    /// The client query equivalent to this fetch's search and sort intent.
    pub fn as_query(&self) -> Query {
        Query::new()
            .with_search_text(self.search_query.clone().unwrap_or_default())
            .with_category(self.category.clone())
            .with_sort(self.sort)
    }
}

/// One wishlisted product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WishlistEntry {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            added_at: Some(Utc::now()),
        }
    }
}

/// Aggregate numbers over available listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub total_products: usize,
    /// Mean of the valid prices, rounded down to a minor unit.
    pub average_price: Option<Money>,
    pub category_breakdown: BTreeMap<String, usize>,
    pub condition_breakdown: BTreeMap<String, usize>,
}

impl ProductStats {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut stats = ProductStats::default();
        let mut price_sum = 0i64;
        let mut priced = 0i64;
        let mut currency = Currency::default();

        for product in products {
            stats.total_products += 1;
            if let Some(price) = product.valid_price() {
                price_sum = price_sum.saturating_add(price.amount_minor);
                priced += 1;
                currency = price.currency;
            }
            if let Some(c) = &product.category {
                *stats.category_breakdown.entry(c.as_str().to_string()).or_default() += 1;
            }
            if let Some(c) = &product.condition {
                *stats.condition_breakdown.entry(c.as_str().to_string()).or_default() += 1;
            }
        }

        if priced > 0 {
            stats.average_price = Some(Money::new(price_sum / priced, currency));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_carries_intent() {
        let query = Query::new()
            .with_search_text("  lamp ")
            .with_category(Category::Furniture)
            .with_sort(SortMode::Newest)
            .with_timeframe(Timeframe::Week);
        let fetch = ProductFetch::from_query(&query, 200);

        assert_eq!(fetch.search_query.as_deref(), Some("lamp"));
        assert_eq!(fetch.category, CategoryFilter::Only(Category::Furniture));
        assert_eq!(fetch.sort, SortMode::Newest);
        assert_eq!(fetch.limit, 200);
        assert_eq!(fetch.offset, 0);
    }

    #[test]
    fn test_batches_advance_by_limit() {
        let first = ProductFetch::from_query(&Query::new(), 200);
        let second = first.next_batch();
        let third = second.next_batch();

        assert_eq!(second.offset, 200);
        assert_eq!(third.offset, 400);
        assert_eq!(third.limit, 200);
        assert_eq!(third.sort, first.sort);

        assert!(!first.is_last_batch(200));
        assert!(first.is_last_batch(50));
        assert!(first.is_last_batch(0));
    }

    #[test]
    fn test_stats() {
        let inr = |n| Money::from_major(n, Currency::INR);
        let products = [
            Product::new("a", inr(100)).with_category(Category::Art),
            Product::new("b", inr(300)).with_category(Category::Art),
            Product::new("c", inr(200)).with_condition(Condition::Good),
        ];
        let stats = ProductStats::from_products(&products);

        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.average_price, Some(inr(200)));
        assert_eq!(stats.category_breakdown.get("art"), Some(&2));
        assert_eq!(stats.condition_breakdown.get("good"), Some(&1));
    }
}
