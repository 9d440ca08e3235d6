//! End-to-end runs of the listing pipeline over a small campus catalog.

use campus_market::prelude::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn inr(n: i64) -> Money {
    Money::from_major(n, Currency::INR)
}

fn listing(id: &str, title: &str, price: i64, category: Category, age: Duration) -> Product {
    Product::new(title, inr(price))
        .with_id(id)
        .with_category(category)
        .posted_at(now() - age)
}

fn catalog() -> Vec<Product> {
    vec![
        listing("1", "Engineering Mathematics Textbook - 3rd Edition", 850, Category::Textbooks, Duration::hours(2)),
        listing("2", "MacBook Air M1 - 8GB RAM, 256GB SSD", 65000, Category::Electronics, Duration::hours(5)),
        listing("3", "Study Table with Chair - Wooden", 3500, Category::Furniture, Duration::hours(26)),
        listing("4", "Gaming Headphones - Sony WH-1000XM4", 18000, Category::Electronics, Duration::days(4)),
        listing("5", "Mountain Bike - Trek 3500", 12000, Category::Bikes, Duration::hours(6)),
        listing("6", "Winter Jacket - North Face", 4500, Category::Clothing, Duration::hours(3)),
    ]
}

fn prices(view: &ResultView<&Product>) -> Vec<i64> {
    view.items
        .iter()
        .filter_map(|p| p.price.map(|m| m.major()))
        .collect()
}

fn ids<'a>(view: &'a ResultView<&'a Product>) -> Vec<&'a str> {
    view.items.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn unfiltered_query_keeps_every_listing() {
    let products = catalog();
    let view = compute_view(&products, &Query::new(), now());

    assert_eq!(view.matched_count, 6);
    assert_eq!(ids(&view), vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn price_window_sorted_low_to_high() {
    let products = catalog();
    let query = Query::new()
        .with_price_range(PriceRange::new(inr(1000), inr(20000)).unwrap())
        .with_sort(SortMode::PriceLow);

    let view = compute_view(&products, &query, now());
    assert_eq!(view.matched_count, 4);
    assert_eq!(prices(&view), vec![3500, 4500, 12000, 18000]);
}

#[test]
fn text_search_is_case_insensitive() {
    let products = catalog();

    for text in ["bike", "BIKE", "  Bike "] {
        let view = compute_view(&products, &Query::new().with_search_text(text), now());
        assert_eq!(ids(&view), vec!["5"], "search {:?}", text);
    }
}

#[test]
fn last_day_excludes_older_listings() {
    let products = catalog();
    let query = Query::new().with_timeframe(Timeframe::Day);

    let view = compute_view(&products, &query, now());
    assert_eq!(ids(&view), vec!["1", "2", "5", "6"]);
}

#[test]
fn paging_clamps_to_last_page() {
    let products = catalog();
    let mut query = Query::new()
        .with_sort(SortMode::PriceLow)
        .with_pager(Pager::new(2));

    let view = compute_view(&products, &query, now());
    assert_eq!(view.matched_count, 6);
    assert_eq!(prices(&view), vec![850, 3500]);
    assert_eq!(view.page_info.total_pages, 3);

    query.pager.go_to_page(3, view.matched_count);
    let view = compute_view(&products, &query, now());
    assert_eq!(prices(&view), vec![18000, 65000]);
    assert!(!view.page_info.has_next);

    assert_eq!(query.pager.go_to_page(4, view.matched_count), 3);
    let clamped = compute_view(&products, &query, now());
    assert_eq!(prices(&clamped), vec![18000, 65000]);
}

#[test]
fn combined_filters_narrow_together() {
    let products = catalog();
    let query = Query::new()
        .with_category(Category::Electronics)
        .with_price_range(PriceRange::new(inr(0), inr(20000)).unwrap());

    let view = compute_view(&products, &query, now());
    assert_eq!(ids(&view), vec!["4"]);
    assert_eq!(query.active_filter_count(), 2);
}

#[test]
fn related_listings_share_the_category() {
    let products = catalog();
    let related = related_products(&products, &products[1], 4);
    let related: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(related, vec!["4"]);
}
