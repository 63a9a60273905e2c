//! Hard constraints applied before ranking
//!
//! Category and brand use plain case-sensitive substring containment. This is
//! a known precision limitation kept to match the established policy: a
//! category of `"helmet"` will not match a product labelled `"Helmet"`.

use super::query::NormalizedQuery;
use crate::catalog::Product;

/// Whether `product` matches the query category via its category or title
pub fn category_matches(product: &Product, query: &NormalizedQuery) -> bool {
    match &query.category {
        Some(category) => {
            product.category.contains(category.as_str())
                || product.title.contains(category.as_str())
        }
        None => true,
    }
}

/// Whether the product title contains the query brand
pub fn brand_matches(product: &Product, query: &NormalizedQuery) -> bool {
    match &query.brand {
        Some(brand) => product.title.contains(brand.as_str()),
        None => true,
    }
}

/// Products satisfying category, price window and brand, in catalog order
pub fn filter_candidates<'a>(catalog: &'a [Product], query: &NormalizedQuery) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|product| {
            category_matches(product, query)
                && query.price_in_range(product.price)
                && brand_matches(product, query)
        })
        .collect()
}
