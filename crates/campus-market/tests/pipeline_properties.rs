//! Property-based tests for the result pipeline
//!
//! These tests verify invariants that should hold for all inputs:
//! - compute_view is idempotent
//! - Narrowing the price range never increases the matched count
//! - price-low output is ordered by price
//! - Paged slices reconstruct the full matched set
//! - An empty condition set behaves like no condition filter

use campus_market::prelude::*;
use campus_market::search::{matches, Filter, MAX_PAGE_SIZE};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn category() -> impl Strategy<Value = Option<Category>> {
    prop_oneof![
        Just(None),
        Just(Some(Category::Bikes)),
        Just(Some(Category::Electronics)),
        Just(Some(Category::Textbooks)),
        Just(Some(Category::Unknown("misc".to_string()))),
    ]
}

fn condition() -> impl Strategy<Value = Option<Condition>> {
    prop_oneof![
        Just(None),
        Just(Some(Condition::New)),
        Just(Some(Condition::Good)),
        Just(Some(Condition::Poor)),
        Just(Some(Condition::Unknown("mint".to_string()))),
    ]
}

/// Generate a possibly sparse product
fn product() -> impl Strategy<Value = Product> {
    (
        "[a-z ]{0,12}",
        proptest::option::of(-100i64..80_000),
        category(),
        condition(),
        proptest::option::of(0i64..24 * 60),
        0u64..500,
    )
        .prop_map(|(title, price, category, condition, age_hours, views)| {
            let mut p = Product::new(title, Money::zero(Currency::INR)).with_views(views);
            p.price = price.map(|n| Money::from_major(n, Currency::INR));
            p.category = category;
            p.condition = condition;
            p.posted_at = age_hours.map(|h| fixed_now() - Duration::hours(h));
            p
        })
}

fn query() -> impl Strategy<Value = Query> {
    (
        prop_oneof![Just(""), Just("a"), Just("bike"), Just("e")],
        prop::sample::select(SortMode::ALL.to_vec()),
        prop_oneof![
            Just(Timeframe::All),
            Just(Timeframe::Day),
            Just(Timeframe::Week),
            Just(Timeframe::Month)
        ],
        1u32..8,
    )
        .prop_map(|(text, sort, timeframe, page_size)| {
            Query::new()
                .with_search_text(text)
                .with_sort(sort)
                .with_timeframe(timeframe)
                .with_pager(Pager::new(page_size))
        })
}

fn ids(items: &[&Product]) -> Vec<String> {
    items.iter().map(|p| p.id.to_string()).collect()
}

proptest! {
    /// Property: equal inputs give structurally equal views
    #[test]
    fn prop_compute_view_is_idempotent(
        products in prop::collection::vec(product(), 0..30),
        query in query()
    ) {
        let first = compute_view(&products, &query, fixed_now());
        let second = compute_view(&products, &query, fixed_now());
        prop_assert_eq!(first, second);
    }

    /// Property: narrowing the price range never grows the matched set
    #[test]
    fn prop_price_narrowing_is_monotonic(
        products in prop::collection::vec(product(), 0..30),
        query in query(),
        lo in 0i64..40_000,
        span in 0i64..40_000
    ) {
        let narrowed = PriceRange::new(
            Money::from_major(lo, Currency::INR),
            Money::from_major((lo + span).min(50_000), Currency::INR),
        ).unwrap();

        let wide = compute_view(&products, &query, fixed_now());
        let narrow = compute_view(&products, &query.clone().with_price_range(narrowed), fixed_now());
        prop_assert!(narrow.matched_count <= wide.matched_count);
    }

    /// Property: price-low pages are ordered by ascending price
    #[test]
    fn prop_price_low_is_sorted(
        products in prop::collection::vec(product(), 0..30),
        query in query()
    ) {
        let query = query.with_sort(SortMode::PriceLow);
        let view = compute_view(&products, &query, fixed_now());
        for pair in view.items.windows(2) {
            prop_assert!(pair[0].price <= pair[1].price);
        }
    }

    /// Property: concatenating every page reconstructs the matched set
    #[test]
    fn prop_pages_cover_matched_set(
        products in prop::collection::vec(product(), 0..40),
        query in query()
    ) {
        let mut everything = query.clone();
        everything.pager = Pager::new(MAX_PAGE_SIZE);
        let full = compute_view(&products, &everything, fixed_now());

        let mut concatenated = Vec::new();
        let total_pages = query.pager.total_pages(full.matched_count);
        for page in 1..=total_pages {
            let mut paged = query.clone();
            paged.pager.page = page;
            concatenated.extend(ids(&compute_view(&products, &paged, fixed_now()).items));
        }

        prop_assert_eq!(concatenated, ids(&full.items));
    }

    /// Property: an empty condition set never rejects a product
    #[test]
    fn prop_empty_condition_set_is_no_filter(
        product in product(),
        query in query()
    ) {
        let unrestricted = query.clone().with_conditions(Vec::<Condition>::new());
        let filter = Filter::new(&unrestricted, fixed_now());
        prop_assert!(filter.matches_condition(&product));
        prop_assert_eq!(
            matches(&product, &unrestricted, fixed_now()),
            matches(&product, &query, fixed_now())
        );
    }
}
