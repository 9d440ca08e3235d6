//! The result pipeline and its output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::{Category, Condition, Product};
use crate::search::{sort_products, CategoryFilter, Filter, PageInfo, Query};

/// The derived, ordered, paginated output of applying a query to a
/// product collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultView<T> {
    /// Number of products that passed every filter, before pagination.
    pub matched_count: usize,
    /// The visible slice.
    pub items: Vec<T>,
    pub page_info: PageInfo,
    /// Term counts over the matched set.
    pub facets: Vec<Facet>,
}

impl<T> ResultView<T> {
    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matched_count == 0
    }

    /// Number of visible items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultView<U> {
        ResultView {
            matched_count: self.matched_count,
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
            facets: self.facets,
        }
    }
}

impl ResultView<&Product> {
    /// Detach the view from the candidate slice.
    pub fn cloned(self) -> ResultView<Product> {
        self.map(Product::clone)
    }
}

/// Filter, order and slice `products` according to `query`.
///
/// Pure: equal inputs give equal outputs and the products are not touched.
/// Recency is measured against `now`.
pub fn compute_view<'a>(
    products: &'a [Product],
    query: &Query,
    now: DateTime<Utc>,
) -> ResultView<&'a Product> {
    let filter = Filter::new(query, now);
    let mut matched: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    sort_products(&mut matched, query.sort);

    let range = query.pager.visible_range(matched.len());
    let facets = build_facets(&matched, query);

    trace!(
        candidates = products.len(),
        matched = matched.len(),
        page = query.pager.page,
        "computed result view"
    );

    ResultView {
        matched_count: matched.len(),
        page_info: query.pager.info(matched.len()),
        items: matched[range].to_vec(),
        facets,
    }
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Category", "Condition").
    pub name: String,
    /// Query field this facet filters on.
    pub field: String,
    /// Facet values, most frequent first.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create a new terms facet.
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(
        &mut self,
        value: impl Into<String>,
        label: impl Into<String>,
        count: usize,
        selected: bool,
    ) {
        self.values.push(FacetValue {
            value: value.into(),
            label: label.into(),
            count,
            selected,
        });
    }

    fn sort_values(&mut self) {
        self.values
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value as it appears in a query.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Number of matched items with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

fn build_facets(matched: &[&Product], query: &Query) -> Vec<Facet> {
    let mut categories: HashMap<&Category, usize> = HashMap::new();
    let mut conditions: HashMap<&Condition, usize> = HashMap::new();
    for product in matched {
        if let Some(c) = &product.category {
            *categories.entry(c).or_default() += 1;
        }
        if let Some(c) = &product.condition {
            *conditions.entry(c).or_default() += 1;
        }
    }

    let mut category = Facet::terms("Category", "category");
    for (c, count) in categories {
        let selected = matches!(&query.category, CategoryFilter::Only(sel) if sel == c);
        category.add_value(c.as_str(), c.display_name(), count, selected);
    }
    category.sort_values();

    let mut condition = Facet::terms("Condition", "condition");
    for (c, count) in conditions {
        condition.add_value(c.as_str(), c.display_name(), count, query.conditions.contains(c));
    }
    condition.sort_values();

    vec![category, condition]
}
