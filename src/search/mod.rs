//! # Product Search Module
//!
//! This module turns a structured [`FilterParams`] into a short, ranked list of
//! products. It never returns "nothing" when something close exists: thin
//! strict results are topped up with products whose price is near the
//! requested budget, each tagged with the reason it was included.
//!
//! ## Search Process
//!
//! 1. Normalize the filter (defaults, keyword tokens)
//! 2. Keep products passing category, price and brand constraints
//! 3. Score by keyword hits and drop non-matching products, when keywords exist
//! 4. Relax the price window if too few strict matches remain
//! 5. Concatenate, deduplicate by title and cap the list
//!
//! Searching reads an immutable catalog snapshot and allocates only its own
//! result, so concurrent searches need no coordination.

mod assemble;
mod config;
mod filter;
mod query;
mod relax;
mod scoring;

pub use assemble::assemble;
pub use config::{SearchConfig, SearchConfigBuilder};
pub use filter::{brand_matches, category_matches, filter_candidates};
pub use query::{FilterParams, NormalizedQuery};
pub use relax::{price_distance, relax};
pub use scoring::{keyword_blob, rank_by_keywords, score_candidates};

use crate::catalog::{
    Catalog, CatalogConfig, CatalogError, CatalogSource, CatalogStore, HttpCatalogSource, Product,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A product in a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    /// The matched product
    #[serde(flatten)]
    pub product: Product,

    /// True only for products surfaced by price relaxation
    #[serde(rename = "isCloseMatch", default)]
    pub is_close_match: bool,

    /// Why a close match was included
    #[serde(
        rename = "matchReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub match_reason: Option<String>,
}

impl ProductMatch {
    /// A product satisfying the original filter
    pub fn strict(product: Product) -> Self {
        Self {
            product,
            is_close_match: false,
            match_reason: None,
        }
    }

    /// A product surfaced by relaxation
    pub fn close(product: Product, reason: impl Into<String>) -> Self {
        Self {
            product,
            is_close_match: true,
            match_reason: Some(reason.into()),
        }
    }
}

/// Run the full search pipeline over `catalog`
pub fn search_catalog(
    catalog: &[Product],
    params: &FilterParams,
    config: &SearchConfig,
) -> Vec<ProductMatch> {
    let query = NormalizedQuery::from_params(params, config);
    debug!(?query, "Normalized search query");

    let mut strict = filter_candidates(catalog, &query);
    let candidate_count = strict.len();
    if let Some(keywords) = &query.keywords {
        strict = rank_by_keywords(strict, keywords);
    }

    let relaxed = if strict.len() < config.relax_threshold {
        relax(
            catalog,
            &query,
            &strict,
            config.price_tolerance,
            &config.close_match_reason,
        )
    } else {
        Vec::new()
    };

    debug!(
        candidates = candidate_count,
        strict = strict.len(),
        relaxed = relaxed.len(),
        "Search stages complete"
    );

    let strict = strict
        .into_iter()
        .map(|product| ProductMatch::strict(product.clone()))
        .collect();
    assemble(strict, relaxed, config.max_results)
}

/// Search engine owning the catalog and its source
///
/// Call [`SearchEngine::load`] once at startup; every search afterwards reads
/// the loaded snapshot. An engine whose load failed simply finds nothing.
pub struct SearchEngine {
    store: CatalogStore,
    source: Arc<dyn CatalogSource>,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create an engine reading from `source`
    pub fn new(source: Arc<dyn CatalogSource>, config: SearchConfig) -> Self {
        Self {
            store: CatalogStore::new(config.record_defaults.clone()),
            source,
            config,
        }
    }

    /// Create an engine fetching the catalog over HTTP
    pub fn with_http(
        catalog_config: &CatalogConfig,
        config: SearchConfig,
    ) -> Result<Self, CatalogError> {
        let source = HttpCatalogSource::new(catalog_config)?;
        Ok(Self::new(Arc::new(source), config))
    }

    /// Load the catalog once; failures are logged and leave it empty
    pub async fn load(&self) -> usize {
        self.store.load(self.source.as_ref()).await
    }

    /// Load the catalog once, reporting failures
    pub async fn try_load(&self) -> Result<usize, CatalogError> {
        self.store.try_load(self.source.as_ref()).await
    }

    /// Whether the catalog holds at least one product
    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    /// Current catalog snapshot
    pub fn catalog(&self) -> Arc<Catalog> {
        self.store.snapshot()
    }

    /// The engine configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Ranked matches for `params`, at most `max_results` long
    #[instrument(skip(self), level = "debug")]
    pub fn search(&self, params: &FilterParams) -> Vec<ProductMatch> {
        let catalog = self.store.snapshot();
        search_catalog(catalog.products(), params, &self.config)
    }
}
