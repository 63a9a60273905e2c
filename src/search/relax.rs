//! Price relaxation for thin result sets
//!
//! When the strict pass finds too little, the whole catalog is rescanned with
//! the price window widened by the configured tolerance. Category still
//! applies; brand deliberately does not.

use super::filter::category_matches;
use super::query::NormalizedQuery;
use super::ProductMatch;
use crate::catalog::Product;
use std::collections::HashSet;

/// Signed distance of `price` from the original price window
///
/// Above the window this is `price - max_price`; otherwise `min_price - price`,
/// which is negative for prices inside the window so those sort first, most
/// expensive leading.
pub fn price_distance(price: u64, query: &NormalizedQuery) -> i128 {
    let price = i128::from(price);
    if price > i128::from(query.max_price) {
        price - i128::from(query.max_price)
    } else {
        i128::from(query.min_price) - price
    }
}

/// Close matches from the widened price window, nearest first
///
/// Products whose title already appears in `already_found` are skipped.
pub fn relax(
    catalog: &[Product],
    query: &NormalizedQuery,
    already_found: &[&Product],
    tolerance: u64,
    reason: &str,
) -> Vec<ProductMatch> {
    let relaxed_min = query.min_price.saturating_sub(tolerance);
    let relaxed_max = query.max_price.saturating_add(tolerance);
    let seen: HashSet<&str> = already_found.iter().map(|p| p.title.as_str()).collect();

    let mut close: Vec<&Product> = catalog
        .iter()
        .filter(|product| !seen.contains(product.title.as_str()))
        .filter(|product| category_matches(product, query))
        .filter(|product| product.price >= relaxed_min && product.price <= relaxed_max)
        .collect();
    close.sort_by_key(|product| price_distance(product.price, query));

    close
        .into_iter()
        .map(|product| ProductMatch::close(product.clone(), reason))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::search::{FilterParams, SearchConfig};

    const REASON: &str = "price close to your budget";

    fn query(params: FilterParams) -> NormalizedQuery {
        NormalizedQuery::from_params(&params, &SearchConfig::default())
    }

    #[test]
    fn test_price_distance() {
        let q = query(FilterParams::new("x").with_min_price(1_000).with_max_price(2_000));

        assert_eq!(price_distance(2_500, &q), 500);
        assert_eq!(price_distance(400, &q), 600);
        assert_eq!(price_distance(1_500, &q), -500);
        assert_eq!(price_distance(2_000, &q), -1_000);
    }

    #[test]
    fn test_in_window_items_sort_by_descending_price_before_outside() {
        let catalog = vec![
            product("Helmet cheap", "helmet", 500_000),
            product("Helmet mid", "helmet", 1_500_000),
            product("Helmet over", "helmet", 2_500_000),
        ];
        let q = query(FilterParams::new("helmet").with_max_price(2_000_000));

        let close = relax(&catalog, &q, &[], 2_000_000, REASON);
        let titles: Vec<&str> = close.iter().map(|m| m.product.title.as_str()).collect();
        assert_eq!(titles, vec!["Helmet mid", "Helmet cheap", "Helmet over"]);
    }

    #[test]
    fn test_inverted_window_distances() {
        let q = query(FilterParams::new("x").with_min_price(3_000).with_max_price(1_000));

        assert_eq!(price_distance(1_500, &q), 500);
        assert_eq!(price_distance(800, &q), 2_200);
    }

    #[test]
    fn test_widened_window_and_ordering() {
        let catalog = vec![
            product("Far above", "helmet", 3_900_000),
            product("Just above", "helmet", 2_100_000),
            product("Out of reach", "helmet", 4_100_000),
            product("Below", "helmet", 800_000),
        ];
        let q = query(
            FilterParams::new("helmet")
                .with_min_price(1_000_000)
                .with_max_price(2_000_000),
        );

        let close = relax(&catalog, &q, &[], 2_000_000, REASON);
        let titles: Vec<&str> = close.iter().map(|m| m.product.title.as_str()).collect();
        assert_eq!(titles, vec!["Just above", "Below", "Far above"]);
        assert!(close.iter().all(|m| m.is_close_match));
        assert!(close.iter().all(|m| m.match_reason.as_deref() == Some(REASON)));
    }

    #[test]
    fn test_relaxed_min_saturates_at_zero() {
        let catalog = vec![product("Free sticker", "sticker", 0)];
        let q = query(FilterParams::new("sticker").with_min_price(500_000));

        let close = relax(&catalog, &q, &[], 2_000_000, REASON);
        assert_eq!(close.len(), 1);
    }

    #[test]
    fn test_excludes_already_found_titles() {
        let catalog = vec![product("Helmet A", "helmet", 100), product("Helmet B", "helmet", 300)];
        let strict = [&catalog[0]];
        let q = query(FilterParams::new("helmet").with_max_price(200));

        let close = relax(&catalog, &q, &strict, 1_000, REASON);
        assert_eq!(close.len(), 1);
        assert_eq!(close[0].product.title, "Helmet B");
    }

    #[test]
    fn test_category_still_applies_but_brand_does_not() {
        let catalog = vec![
            product("Yamaha helmet", "helmet", 1_000),
            product("Honda gloves", "gloves", 1_000),
        ];
        let q = query(FilterParams::new("helmet").with_brand("Honda").with_max_price(500));

        let close = relax(&catalog, &q, &[], 1_000, REASON);
        assert_eq!(close.len(), 1);
        assert_eq!(close[0].product.title, "Yamaha helmet");
    }

    #[test]
    fn test_huge_max_price_does_not_overflow() {
        let catalog = vec![product("Helmet", "helmet", u64::MAX)];
        let q = query(FilterParams::new("helmet").with_max_price(u64::MAX - 1));

        let close = relax(&catalog, &q, &[], 2_000_000, REASON);
        assert_eq!(close.len(), 1);
    }
}
