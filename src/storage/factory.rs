//! Storage backend factory.
//!
//! Creates the one configured storage backend at startup. There is no
//! runtime switching; the returned store lives for the process lifetime.

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppError;
use crate::storage::memory::MemoryStore;
use crate::storage::mongo::MongoStore;
use crate::storage::postgres::PostgresStore;
use crate::storage::traits::BookStore;

/// Create a storage backend based on configuration.
///
/// Verifies reachability before returning; a failure here is fatal to
/// startup and the process never proceeds to serve requests.
///
/// # Errors
///
/// Returns an error if connection parameters are invalid or the backend is
/// unreachable. There is no retry.
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn BookStore>, AppError> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::MongoDb => {
            let store = MongoStore::connect(&config.mongodb)
                .await
                .map_err(AppError::Storage)?;
            store.health_check().await.map_err(AppError::Storage)?;
            Ok(Arc::new(store))
        }
        StorageBackend::Postgres => {
            let store = PostgresStore::connect(&config.postgres)
                .await
                .map_err(AppError::Storage)?;
            store.health_check().await.map_err(AppError::Storage)?;
            Ok(Arc::new(store))
        }
    }
}
