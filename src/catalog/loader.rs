//! Load-once holder for the product catalog

use super::error::CatalogError;
use super::normalize::{normalize_record, RecordDefaults};
use super::source::CatalogSource;
use super::{Catalog, Product};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Owns the loaded catalog and hands out consistent snapshots
///
/// The catalog is fetched at most once: after a load has produced at least
/// one product, further loads return immediately. A failed or empty load
/// leaves the store empty so a later call may try again.
#[derive(Debug, Default)]
pub struct CatalogStore {
    snapshot: RwLock<Arc<Catalog>>,
    load_lock: Mutex<()>,
    defaults: RecordDefaults,
}

impl CatalogStore {
    /// Create an empty store
    pub fn new(defaults: RecordDefaults) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Catalog::default())),
            load_lock: Mutex::new(()),
            defaults,
        }
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Whether at least one product has been loaded
    pub fn is_loaded(&self) -> bool {
        !self.snapshot().is_empty()
    }

    /// Load the catalog from `source` unless it is already populated
    ///
    /// Failures are logged and absorbed; the store then stays empty and
    /// searches return no results. Returns the number of products held.
    pub async fn load(&self, source: &dyn CatalogSource) -> usize {
        match self.try_load(source).await {
            Ok(count) => count,
            Err(e) => {
                error!(source = %source.describe(), "Error loading product catalog: {}", e);
                0
            }
        }
    }

    /// Like [`CatalogStore::load`] but reports fetch failures to the caller
    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub async fn try_load(&self, source: &dyn CatalogSource) -> Result<usize, CatalogError> {
        if self.is_loaded() {
            return Ok(self.snapshot().len());
        }

        // Serialise first loads so the source is fetched once
        let _guard = self.load_lock.lock().await;
        if self.is_loaded() {
            return Ok(self.snapshot().len());
        }

        let records = source.fetch_raw_catalog().await?;
        let products: Vec<Product> = records
            .iter()
            .enumerate()
            .map(|(index, raw)| normalize_record(index, raw, &self.defaults))
            .collect();

        let count = products.len();
        self.replace(Catalog::new(products));
        info!("Loaded {} products", count);

        Ok(count)
    }

    fn replace(&self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = catalog,
            Err(poisoned) => *poisoned.into_inner() = catalog,
        }
    }
}
