//! # Cartwise - Catalog Search for Conversational Shopping
//!
//! This crate is the retrieval core of a chat-based shopping assistant. An LLM
//! collects the user's intent and, once it knows enough, calls a
//! `query_knowledge_base` tool with a structured filter. Cartwise answers that
//! call from an in-memory product catalog with a short ranked list that
//! degrades gracefully: when nothing matches exactly, products priced close to
//! the budget are offered instead, each tagged with the reason.
//!
//! ## Features
//!
//! - Load-once catalog fetched over HTTP (or from a file) and normalized from a
//!   loosely shaped JSON feed
//! - Hard filtering on category, price window and brand
//! - Keyword scoring across title, description and features
//! - Price relaxation with distance ordering for thin result sets
//! - A closed tool-call type and schema for the LLM boundary
//! - Terminal rendering of results
//!
//! ## Example
//!
//! ```rust,no_run
//! use cartwise::catalog::CatalogConfig;
//! use cartwise::search::{FilterParams, SearchConfig, SearchEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = SearchEngine::with_http(&CatalogConfig::default(), SearchConfig::default())?;
//!     engine.load().await;
//!
//!     let params = FilterParams::new("کلاه کاسکت")
//!         .with_max_price(5_000_000)
//!         .with_keywords("قرمز");
//!     for item in engine.search(&params) {
//!         println!("{} - {}", item.product.title, item.product.price);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod render;

pub mod catalog;
pub mod search;
pub mod tools;

pub use error::{Error, Result};
pub use render::{format_price, render_products};

/// Re-export of commonly used types
pub mod prelude {
    pub use crate::catalog::{CatalogConfig, Product};
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::search::{FilterParams, ProductMatch, SearchConfig, SearchEngine};
    pub use crate::tools::{ToolCall, ToolOutcome};
}
