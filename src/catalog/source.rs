//! Raw catalog providers
//!
//! A [`CatalogSource`] only fetches raw JSON records; normalization happens in
//! the loader so the same rules apply to every source.

use super::config::CatalogConfig;
use super::error::CatalogError;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tracing::{debug, instrument};
use url::Url;

/// Boxed future returned by catalog sources
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Value>, CatalogError>> + Send + 'a>>;

/// Provider of raw product records
pub trait CatalogSource: Send + Sync {
    /// Fetch the raw product records
    fn fetch_raw_catalog(&self) -> FetchFuture<'_>;

    /// Human readable location, used in logs
    fn describe(&self) -> String;
}

/// Fetches the catalog as a JSON array over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: ReqwestClient,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for the configured URL
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let url = Url::parse(&config.url)?;
        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, url })
    }

    #[instrument(skip(self), fields(url = %self.url), level = "debug")]
    async fn fetch(&self) -> Result<Vec<Value>, CatalogError> {
        debug!("Sending GET request for catalog");
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status_code: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let text = response.text().await?;
        into_records(serde_json::from_str(&text)?)
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch_raw_catalog(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch())
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Reads the catalog from a local JSON file
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn fetch_raw_catalog(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(&self.path).await?;
            into_records(serde_json::from_str(&content)?)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed set of raw records from memory
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    records: Vec<Value>,
}

impl StaticCatalogSource {
    /// Create a source serving `records`
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn fetch_raw_catalog(&self) -> FetchFuture<'_> {
        let records = self.records.clone();
        Box::pin(async move { Ok(records) })
    }

    fn describe(&self) -> String {
        format!("<{} in-memory records>", self.records.len())
    }
}

fn into_records(document: Value) -> Result<Vec<Value>, CatalogError> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Null => Err(CatalogError::NotAnArray("null".to_string())),
        Value::Bool(_) => Err(CatalogError::NotAnArray("boolean".to_string())),
        Value::Number(_) => Err(CatalogError::NotAnArray("number".to_string())),
        Value::String(_) => Err(CatalogError::NotAnArray("string".to_string())),
        Value::Object(_) => Err(CatalogError::NotAnArray("object".to_string())),
    }
}
