//! Error types for the cartwise crate

use thiserror::Error;

/// Result type for cartwise operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cartwise operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal output error
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog loading error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Tool call error
    #[error("Tool error: {0}")]
    Tool(String),
}
