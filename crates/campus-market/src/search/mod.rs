//! Search module.
//!
//! Contains the query model, filter predicates, sort comparators,
//! pagination and the result pipeline that ties them together.

mod filter;
mod pagination;
mod params;
mod query;
mod related;
mod results;
mod sort;

pub use filter::{matches, Filter};
pub use pagination::{
    PageInfo, PageLink, Pager, PaginationMode, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    PAGE_SIZE_OPTIONS,
};
pub use params::{decode_component, encode_component, UrlParams};
pub use query::{
    CategoryFilter, PriceRange, Query, QueryChange, SortMode, Timeframe, DEFAULT_PRICE_CEILING,
};
pub use related::{related_products, DEFAULT_RELATED_LIMIT};
pub use results::{compute_view, Facet, FacetValue, ResultView};
pub use sort::{comparator_for, sort_products, Comparator};
