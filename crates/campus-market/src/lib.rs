//! Campus marketplace domain types and listing search.
//!
//! This crate provides the types and pure logic shared by every page of the
//! marketplace:
//!
//! - **Catalog**: Products, categories, conditions, listing drafts
//! - **Search**: Filter predicates, sort comparators, pagination, the
//!   result pipeline and the URL parameter codec
//!
//! Nothing in here performs I/O. Fetching, sessions and page state live in
//! the `campus-data`, `campus-auth` and `campus-browse` crates.
//!
//! # Example
//!
//! ```rust
//! use campus_market::prelude::*;
//! use chrono::Utc;
//!
//! let products = vec![
//!     Product::new("Mountain Bike - Trek 3500", Money::from_major(12000, Currency::INR))
//!         .with_category(Category::Bikes),
//!     Product::new("Winter Jacket", Money::from_major(4500, Currency::INR))
//!         .with_category(Category::Clothing),
//! ];
//!
//! let query = Query::new().with_search_text("bike").with_sort(SortMode::PriceLow);
//! let view = compute_view(&products, &query, Utc::now());
//!
//! assert_eq!(view.matched_count, 1);
//! assert_eq!(view.items[0].title, "Mountain Bike - Trek 3500");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::MarketError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MarketError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, Condition, ContactPreferences, ListingDraft, ListingErrors, ListingField,
        NewListing, Product, Seller,
    };

    // Search
    pub use crate::search::{
        compute_view, related_products, CategoryFilter, Facet, FacetValue, PageInfo, PageLink,
        Pager, PaginationMode, PriceRange, Query, QueryChange, ResultView, SortMode, Timeframe,
        UrlParams,
    };
}
