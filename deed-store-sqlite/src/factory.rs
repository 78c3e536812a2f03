use async_trait::async_trait;
use deed_core::store::{KeyValueStore, StoreConfig, StoreError, StoreFactory};

use crate::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// ```rust,no_run
/// use deed_core::store::StoreRegistry;
/// use deed_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::with_memory();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string` (a file path or `:memory:`) and
    /// brings the schema up to date.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let store = SqliteStore::new(&config.connection_string).await?;
        store.run_migrations().await?;
        Ok(Box::new(store))
    }
}
