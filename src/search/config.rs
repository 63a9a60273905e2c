//! # Search Configuration Module
//!
//! Policy knobs for ranking and relaxation. The defaults reproduce the
//! behaviour the assistant shipped with: relax when fewer than five strict
//! matches exist, widen the price window by two million toman, and return at
//! most ten products.

use crate::catalog::RecordDefaults;

/// Configuration for the search engine
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Relaxation runs when the strict result has fewer items than this
    pub relax_threshold: usize,

    /// Amount the price window is widened by on each side during relaxation
    pub price_tolerance: u64,

    /// Maximum number of products returned by a search
    pub max_results: usize,

    /// Upper price bound used when a filter gives none
    pub default_max_price: u64,

    /// Minimum number of characters for a keyword token to count
    pub min_keyword_len: usize,

    /// Reason attached to products surfaced by relaxation
    pub close_match_reason: String,

    /// Defaults for records missing a title or category
    pub record_defaults: RecordDefaults,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relax_threshold: 5,
            price_tolerance: 2_000_000,
            max_results: 10,
            default_max_price: 1_000_000_000,
            min_keyword_len: 3,
            close_match_reason: "قیمت نزدیک به بودجه شما".to_string(),
            record_defaults: RecordDefaults::default(),
        }
    }
}

/// Builder for SearchConfig
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Set the strict-result count below which relaxation runs
    pub fn relax_threshold(mut self, relax_threshold: usize) -> Self {
        self.config.relax_threshold = relax_threshold;
        self
    }

    /// Set the price tolerance used by relaxation
    pub fn price_tolerance(mut self, price_tolerance: u64) -> Self {
        self.config.price_tolerance = price_tolerance;
        self
    }

    /// Set the maximum number of results
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Set the upper price bound used when a filter gives none
    pub fn default_max_price(mut self, default_max_price: u64) -> Self {
        self.config.default_max_price = default_max_price;
        self
    }

    /// Set the minimum keyword token length
    pub fn min_keyword_len(mut self, min_keyword_len: usize) -> Self {
        self.config.min_keyword_len = min_keyword_len;
        self
    }

    /// Set the reason attached to relaxed matches
    pub fn close_match_reason(mut self, reason: impl Into<String>) -> Self {
        self.config.close_match_reason = reason.into();
        self
    }

    /// Set the defaults for records missing a title or category
    pub fn record_defaults(mut self, record_defaults: RecordDefaults) -> Self {
        self.config.record_defaults = record_defaults;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl SearchConfig {
    /// Create a new builder
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = SearchConfig::default();

        assert_eq!(config.relax_threshold, 5);
        assert_eq!(config.price_tolerance, 2_000_000);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.default_max_price, 1_000_000_000);
        assert_eq!(config.min_keyword_len, 3);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::builder()
            .relax_threshold(2)
            .price_tolerance(500)
            .max_results(3)
            .close_match_reason("close to budget")
            .build();

        assert_eq!(config.relax_threshold, 2);
        assert_eq!(config.price_tolerance, 500);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.close_match_reason, "close to budget");
        assert_eq!(config.default_max_price, 1_000_000_000);
    }
}
