//! Sort comparators.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::search::SortMode;

/// A comparator over products.
pub type Comparator = fn(&Product, &Product) -> Ordering;

/// Comparator for a sort mode.
///
/// Every comparator reports `Equal` for tied keys, so a stable sort keeps
/// tied products in their input order. Records missing the sort key go
/// after every record that has it, in both directions.
pub fn comparator_for(mode: SortMode) -> Comparator {
    match mode {
        SortMode::Relevance => |_, _| Ordering::Equal,
        SortMode::PriceLow => |a, b| present_first(a.valid_price(), b.valid_price(), Ord::cmp),
        SortMode::PriceHigh => {
            |a, b| present_first(a.valid_price(), b.valid_price(), |x, y| y.cmp(x))
        }
        SortMode::Newest => |a, b| present_first(a.posted_at, b.posted_at, |x, y| y.cmp(x)),
        SortMode::Popularity => |a, b| b.views.cmp(&a.views),
    }
}

/// Stable in-place sort. `Relevance` leaves the order untouched.
pub fn sort_products(products: &mut [&Product], mode: SortMode) {
    if mode == SortMode::Relevance {
        return;
    }
    let cmp = comparator_for(mode);
    products.sort_by(|a, b| cmp(a, b));
}

fn present_first<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use chrono::{Duration, Utc};

    fn priced(id: &str, amount: i64) -> Product {
        Product::new(id, Money::from_major(amount, Currency::INR)).with_id(id)
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_price_low_is_stable_on_ties() {
        let items = [priced("a", 500), priced("b", 100), priced("c", 500), priced("d", 100)];
        let mut refs: Vec<&Product> = items.iter().collect();
        sort_products(&mut refs, SortMode::PriceLow);
        assert_eq!(ids(&refs), ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_price_high() {
        let items = [priced("a", 1), priced("b", 3), priced("c", 2)];
        let mut refs: Vec<&Product> = items.iter().collect();
        sort_products(&mut refs, SortMode::PriceHigh);
        assert_eq!(ids(&refs), ["b", "c", "a"]);
    }

    #[test]
    fn test_missing_price_sorts_last_both_ways() {
        let mut unpriced = priced("x", 0);
        unpriced.price = None;
        let items = [unpriced, priced("a", 9), priced("b", 1)];

        let mut refs: Vec<&Product> = items.iter().collect();
        sort_products(&mut refs, SortMode::PriceLow);
        assert_eq!(ids(&refs), ["b", "a", "x"]);

        sort_products(&mut refs, SortMode::PriceHigh);
        assert_eq!(ids(&refs), ["a", "b", "x"]);
    }

    #[test]
    fn test_newest_and_popularity() {
        let now = Utc::now();
        let items = [
            priced("old", 1).posted_at(now - Duration::days(3)).with_views(90),
            priced("new", 1).posted_at(now - Duration::hours(1)).with_views(10),
            priced("mid", 1).posted_at(now - Duration::days(1)).with_views(50),
        ];

        let mut refs: Vec<&Product> = items.iter().collect();
        sort_products(&mut refs, SortMode::Newest);
        assert_eq!(ids(&refs), ["new", "mid", "old"]);

        sort_products(&mut refs, SortMode::Popularity);
        assert_eq!(ids(&refs), ["old", "mid", "new"]);
    }

    #[test]
    fn test_relevance_keeps_input_order() {
        let items = [priced("c", 3), priced("a", 1), priced("b", 2)];
        let mut refs: Vec<&Product> = items.iter().collect();
        sort_products(&mut refs, SortMode::Relevance);
        assert_eq!(ids(&refs), ["c", "a", "b"]);
        assert_eq!(comparator_for(SortMode::Relevance)(&items[0], &items[1]), Ordering::Equal);
    }
}
