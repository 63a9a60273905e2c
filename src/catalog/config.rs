//! # Catalog Configuration Module
//!
//! Configuration for fetching the remote product feed. Uses the same builder
//! pattern as the search configuration.

use std::time::Duration;

/// Product feed the assistant was originally built against
pub const DEFAULT_CATALOG_URL: &str = "https://raw.githubusercontent.com/RezaSbu/Database/refs/heads/main/optimized_products_final_updated.json";

/// Configuration for the catalog source
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// URL of the JSON product feed
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent to use for requests
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("cartwise/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for CatalogConfig
#[derive(Debug, Default)]
pub struct CatalogConfigBuilder {
    config: CatalogConfig,
}

impl CatalogConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default(),
        }
    }

    /// Set the feed URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CatalogConfig {
        self.config
    }
}

impl CatalogConfig {
    /// Create a new builder
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::new()
    }

    /// Get the timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
