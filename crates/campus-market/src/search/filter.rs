//! Listing filter predicates.
//!
//! Each predicate decides one filter dimension. A product is kept when all
//! of them hold. Predicates never fail: a field the predicate needs but the
//! record lacks simply does not match.

use chrono::{DateTime, Utc};

use crate::catalog::Product;
use crate::search::{CategoryFilter, Query};

/// A query prepared for repeated evaluation.
///
/// Lowercasing the search text and resolving the recency cutoff happen once
/// here instead of once per product.
#[derive(Debug, Clone)]
pub struct Filter<'q> {
    query: &'q Query,
    needle: Option<String>,
    posted_after: Option<DateTime<Utc>>,
}

impl<'q> Filter<'q> {
    /// Prepare `query`, evaluating recency relative to `now`.
    pub fn new(query: &'q Query, now: DateTime<Utc>) -> Self {
        Self {
            query,
            needle: query.text().map(str::to_lowercase),
            posted_after: query.timeframe.window().map(|w| now - w),
        }
    }

    /// True when `product` satisfies every predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_text(product)
            && self.matches_category(product)
            && self.matches_price(product)
            && self.matches_condition(product)
            && self.matches_recency(product)
    }

    /// Case-insensitive substring of title, description or category id.
    /// Missing fields count as empty text.
    pub fn matches_text(&self, product: &Product) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        let in_title = product.title.to_lowercase().contains(needle.as_str());
        in_title
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle.as_str()))
            || product
                .category
                .as_ref()
                .is_some_and(|c| c.as_str().to_lowercase().contains(needle.as_str()))
    }

    pub fn matches_category(&self, product: &Product) -> bool {
        match &self.query.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => product.category.as_ref() == Some(wanted),
        }
    }

    /// Inclusive on both bounds. Missing or negative prices never match.
    pub fn matches_price(&self, product: &Product) -> bool {
        product
            .valid_price()
            .is_some_and(|price| self.query.price_range.contains(price))
    }

    /// An empty condition set places no restriction.
    pub fn matches_condition(&self, product: &Product) -> bool {
        if self.query.conditions.is_empty() {
            return true;
        }
        product
            .condition
            .as_ref()
            .is_some_and(|c| c.is_known() && self.query.conditions.contains(c))
    }

    /// Age must not exceed the timeframe window.
    pub fn matches_recency(&self, product: &Product) -> bool {
        match self.posted_after {
            None => true,
            Some(cutoff) => product.posted_at.is_some_and(|at| at >= cutoff),
        }
    }
}

/// Decide whether a single product satisfies `query` at time `now`.
pub fn matches(product: &Product, query: &Query, now: DateTime<Utc>) -> bool {
    Filter::new(query, now).matches(product)
}
