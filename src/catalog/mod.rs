//! # Product Catalog Module
//!
//! This module owns the in-memory product catalog that every search reads from.
//! The catalog is fetched once per process from a [`CatalogSource`], normalized
//! into canonical [`Product`] records and then kept read-only.
//!
//! ## Key Components
//!
//! - `Product`: canonical catalog record
//! - `Catalog`: an immutable snapshot of the loaded products
//! - `CatalogStore`: load-once holder that hands out snapshots
//! - `CatalogSource`: pluggable raw-record provider (HTTP, file, in-memory)
//!
//! Feeds are loosely shaped: prices arrive as numbers or formatted strings and
//! features as plain strings or label/value objects. Missing fields are
//! defaulted, never rejected.

mod config;
pub mod error;
mod loader;
mod normalize;
mod source;

pub use config::{CatalogConfig, CatalogConfigBuilder, DEFAULT_CATALOG_URL};
pub use error::CatalogError;
pub use loader::CatalogStore;
pub use normalize::{
    normalize_features, normalize_record, parse_price, parse_price_text, RecordDefaults,
};
pub use source::{
    CatalogSource, FetchFuture, FileCatalogSource, HttpCatalogSource, StaticCatalogSource,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a product, unique within one load
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier (also used for positional fallbacks)
    Number(i64),

    /// Textual identifier as supplied by the feed
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// A canonical catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier of the product
    pub id: ProductId,

    /// Display title, never empty
    pub title: String,

    /// Price in toman
    pub price: u64,

    /// Product page URL (may be the `#` placeholder)
    pub link: String,

    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Free-text category label
    pub category: String,

    /// Short descriptors, in display order
    #[serde(default)]
    pub features: Vec<String>,

    /// Free text used only for keyword scoring
    #[serde(default)]
    pub description: String,
}

/// Immutable snapshot of the loaded products
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from already normalized products
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over the products in feed order
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// All products in feed order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories with their product counts, in first-seen order
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut categories: Vec<(String, usize)> = Vec::new();
        for product in &self.products {
            match categories.iter_mut().find(|(name, _)| *name == product.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((product.category.clone(), 1)),
            }
        }
        categories
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
