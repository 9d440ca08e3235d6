//! Search query state.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Condition};
use crate::money::{Currency, Money};
use crate::search::{Pager, PaginationMode};
use crate::MarketError;

/// Top of the price slider, in major units. Only a reference point for
/// counting active filters; the default range has no upper bound.
pub const DEFAULT_PRICE_CEILING: i64 = 50_000;

/// Sort modes for listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the order the candidates arrived in.
    #[default]
    Relevance,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Most recently posted first.
    Newest,
    /// Most viewed first.
    Popularity,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Relevance,
        SortMode::PriceLow,
        SortMode::PriceHigh,
        SortMode::Newest,
        SortMode::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
            SortMode::Newest => "newest",
            SortMode::Popularity => "popularity",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Relevance => "Relevance",
            SortMode::PriceLow => "Price: Low to High",
            SortMode::PriceHigh => "Price: High to Low",
            SortMode::Newest => "Newest First",
            SortMode::Popularity => "Most Popular",
        }
    }
}

impl FromStr for SortMode {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortMode::Relevance),
            "price-low" | "price_asc" => Ok(SortMode::PriceLow),
            "price-high" | "price_desc" => Ok(SortMode::PriceHigh),
            // The home page grid calls these "recent" and "popular"
            "newest" | "recent" => Ok(SortMode::Newest),
            "popularity" | "popular" => Ok(SortMode::Popularity),
            other => Err(MarketError::UnknownSortMode(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recency window for the posted-at filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::All => "all",
            Timeframe::Day => "24h",
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::All => "Any Time",
            Timeframe::Day => "Last 24 Hours",
            Timeframe::Week => "Last 7 Days",
            Timeframe::Month => "Last 30 Days",
        }
    }

    /// Maximum listing age, or `None` for no restriction.
    pub fn window(&self) -> Option<Duration> {
        match self {
            Timeframe::All => None,
            Timeframe::Day => Some(Duration::hours(24)),
            Timeframe::Week => Some(Duration::days(7)),
            Timeframe::Month => Some(Duration::days(30)),
        }
    }
}

impl FromStr for Timeframe {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Timeframe::All),
            "24h" => Ok(Timeframe::Day),
            "7d" => Ok(Timeframe::Week),
            "30d" => Ok(Timeframe::Month),
            other => Err(MarketError::UnknownTimeframe(other.to_string())),
        }
    }
}

/// Category selection: everything, or one category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a category parameter; empty and `"all"` select everything.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::parse(trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c)
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    /// Create a range, rejecting negative or inverted bounds.
    pub fn new(min: Money, max: Money) -> Result<Self, MarketError> {
        if min.is_negative() || max.is_negative() || min > max {
            return Err(MarketError::InvalidPriceRange {
                min: min.amount_minor,
                max: max.amount_minor,
            });
        }
        Ok(Self { min, max })
    }

    /// `[0, ceiling]` in major units.
    pub fn up_to(ceiling: i64, currency: Currency) -> Self {
        Self {
            min: Money::zero(currency),
            max: Money::from_major(ceiling.max(0), currency),
        }
    }

    /// `[0, ∞)`: every non-negative price.
    pub fn any(currency: Currency) -> Self {
        Self {
            min: Money::zero(currency),
            max: Money::new(i64::MAX, currency),
        }
    }

    /// True when the upper bound is open.
    pub fn is_open_ended(&self) -> bool {
        self.max.amount_minor == i64::MAX
    }

    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && price <= self.max
    }

    /// True when this range excludes part of `[0, ceiling]`. A range reaching
    /// past the ceiling does not narrow it.
    pub fn narrows(&self, ceiling: &PriceRange) -> bool {
        self.min > ceiling.min || self.max < ceiling.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::any(Currency::default())
    }
}

/// A single user edit to the query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryChange {
    SearchText(String),
    Category(CategoryFilter),
    PriceRange(PriceRange),
    /// Add the condition if absent, remove it if present.
    ToggleCondition(Condition),
    Conditions(BTreeSet<Condition>),
    Timeframe(Timeframe),
    Sort(SortMode),
    PageSize(u32),
    Mode(PaginationMode),
    /// Reset text, category, price, conditions and timeframe.
    ClearFilters,
}

/// The full set of user-controlled search, filter, sort and paging
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Free text; empty means no text filter.
    pub search_text: String,
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    /// Accepted conditions; empty means no restriction.
    pub conditions: BTreeSet<Condition>,
    pub timeframe: Timeframe,
    pub sort: SortMode,
    /// Paging state.
    pub pager: Pager,
    /// Slider range; any range covering it counts as "no price filter".
    #[serde(default = "default_price_reference")]
    pub default_price_range: PriceRange,
}

fn default_price_reference() -> PriceRange {
    PriceRange::up_to(DEFAULT_PRICE_CEILING, Currency::default())
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
            price_range: PriceRange::default(),
            conditions: BTreeSet::new(),
            timeframe: Timeframe::All,
            sort: SortMode::Relevance,
            pager: Pager::default(),
            default_price_range: default_price_reference(),
        }
    }

    /// Set the text query.
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Set the slider range used to count the price filter as active.
    /// The active range is left alone.
    pub fn with_price_ceiling(mut self, range: PriceRange) -> Self {
        self.default_price_range = range;
        self
    }

    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions = conditions.into_iter().collect();
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_pager(mut self, pager: Pager) -> Self {
        self.pager = pager;
        self
    }

    /// Apply one user edit. Returns `true` if the query changed, in which
    /// case the pager is back on page 1.
    pub fn apply(&mut self, change: QueryChange) -> bool {
        let before = self.clone();
        match change {
            QueryChange::SearchText(text) => self.search_text = text,
            QueryChange::Category(category) => self.category = category,
            QueryChange::PriceRange(range) => self.price_range = range,
            QueryChange::ToggleCondition(condition) => {
                if !self.conditions.remove(&condition) {
                    self.conditions.insert(condition);
                }
            }
            QueryChange::Conditions(conditions) => self.conditions = conditions,
            QueryChange::Timeframe(timeframe) => self.timeframe = timeframe,
            QueryChange::Sort(sort) => self.sort = sort,
            QueryChange::PageSize(size) => self.pager.page_size = size.clamp(1, super::MAX_PAGE_SIZE),
            QueryChange::Mode(mode) => self.pager.mode = mode,
            QueryChange::ClearFilters => self.clear_filters(),
        }

        let changed = *self != before;
        if changed {
            self.pager.reset();
        }
        changed
    }

    /// Reset every filter to its default. Sort and page size are kept.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.category = CategoryFilter::All;
        self.price_range = PriceRange::any(self.price_range.min.currency);
        self.conditions.clear();
        self.timeframe = Timeframe::All;
        self.pager.reset();
    }

    /// Number of filter groups narrowing the results (text excluded).
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if !self.category.is_all() {
            count += 1;
        }
        if self.price_range.narrows(&self.default_price_range) {
            count += 1;
        }
        if !self.conditions.is_empty() {
            count += 1;
        }
        if self.timeframe != Timeframe::All {
            count += 1;
        }
        count
    }

    /// Trimmed search text, or `None` when there is no text filter.
    pub fn text(&self) -> Option<&str> {
        let t = self.search_text.trim();
        (!t.is_empty()).then_some(t)
    }
}
