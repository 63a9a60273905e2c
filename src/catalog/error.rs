//! Error types for the catalog module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for catalog fetching and decoding
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog server answered with a non-success status
    #[error("Catalog request to {url} failed with status {status_code}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Requested URL
        url: String,
    },

    /// The catalog document was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local catalog file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document was valid JSON but not an array of records
    #[error("Catalog document is not an array (found {0})")]
    NotAnArray(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<CatalogError> for CrateError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Http(e) => CrateError::Http(e),
            CatalogError::Json(e) => CrateError::Json(e),
            _ => CrateError::Catalog(err.to_string()),
        }
    }
}
