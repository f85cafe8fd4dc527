//! MongoDB document storage backend.
//!
//! One document per book in a `books` collection. The driver's `_id` is
//! distinct from the domain `id` field and is excluded from every read via
//! projection; all lookups filter on the domain `id` field.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::MongoStorageConfig;
use crate::domain::{Book, BookPatch, NewBook};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::BookStore;

const COLLECTION: &str = "books";

/// MongoDB storage implementation.
pub struct MongoStore {
    client: Client,
    collection: Collection<Book>,
}

impl MongoStore {
    /// Connect to MongoDB and bind the `books` collection.
    ///
    /// The database comes from the config override if set, otherwise from the
    /// default database of the connection URI.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the URI cannot be parsed or
    /// names no database. Reachability is verified separately through
    /// `health_check` since the driver connects lazily.
    pub async fn connect(config: &MongoStorageConfig) -> StorageResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StorageError::Connection(format!("invalid MongoDB URI: {e}")))?;

        let database = match &config.database {
            Some(name) => client.database(name),
            None => client.default_database().ok_or_else(|| {
                StorageError::Connection(
                    "MongoDB URI names no default database and storage.mongodb.database is unset"
                        .to_string(),
                )
            })?,
        };

        info!(database = %database.name(), "MongoDB storage initialized");
        Ok(Self {
            collection: database.collection(COLLECTION),
            client,
        })
    }
}

#[async_trait]
impl BookStore for MongoStore {
    async fn create(&self, new: NewBook) -> StorageResult<Book> {
        let book = Book::from_new(new);

        // The server assigns its own `_id`; the domain id lives in the `id`
        // field of the document.
        self.collection
            .insert_one(&book)
            .await
            .map_err(|e| StorageError::Query(format!("failed to insert book: {e}")))?;

        Ok(book)
    }

    async fn list_all(&self) -> StorageResult<Vec<Book>> {
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| StorageError::Query(format!("failed to list books: {e}")))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::Serialization(format!("failed to decode book: {e}")))
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Book>> {
        self.collection
            .find_one(doc! { "id": id })
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| StorageError::Query(format!("failed to get book: {e}")))
    }

    async fn update(&self, id: &str, patch: BookPatch) -> StorageResult<Option<Book>> {
        // `$set` with an empty document is rejected by the server, so an
        // empty patch degenerates to a plain read.
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut set = doc! {};
        if let Some(title) = &patch.title {
            set.insert("title", title);
        }
        if let Some(author) = &patch.author {
            set.insert("author", author);
        }
        if let Some(description) = &patch.description {
            set.insert("description", description);
        }
        if let Some(cover_image_url) = &patch.cover_image_url {
            set.insert("cover_image_url", cover_image_url);
        }

        self.collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| StorageError::Query(format!("failed to update book: {e}")))
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| StorageError::Query(format!("failed to delete book: {e}")))?;

        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> StorageResult<()> {
        // Round-trips a ping to verify the server is actually reachable.
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StorageError::Connection(format!("health check failed: {e}")))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Get test MongoDB URI from environment.
    fn test_db_uri() -> Option<String> {
        env::var("TEST_MONGODB_URI").ok()
    }

    /// Skip test if no database available.
    macro_rules! require_db {
        () => {
            match test_db_uri() {
                Some(uri) => uri,
                None => {
                    eprintln!("Skipping test: TEST_MONGODB_URI not set");
                    return;
                }
            }
        };
    }

    async fn connect(uri: &str) -> MongoStore {
        let config = MongoStorageConfig {
            uri: uri.to_string(),
            database: Some("bookshelf_test".to_string()),
        };
        MongoStore::connect(&config).await.unwrap()
    }

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: String::new(),
            cover_image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_connection_and_health() {
        let uri = require_db!();
        let store = connect(&uri).await;
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.backend_name(), "mongodb");
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let uri = require_db!();
        let store = connect(&uri).await;

        let created = store.create(dune()).await.unwrap();
        assert!(!created.id.is_empty());

        // Read results carry the domain fields only; `_id` never leaks.
        let fetched = store.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        let patch = BookPatch {
            author: Some("F. Herbert".to_string()),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.author, "F. Herbert");
        assert_eq!(updated.title, "Dune");

        assert!(store.delete(&created.id).await.unwrap());
        assert_eq!(store.get_by_id(&created.id).await.unwrap(), None);
        assert!(!store.delete(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_patch_returns_unchanged_record() {
        let uri = require_db!();
        let store = connect(&uri).await;

        let created = store.create(dune()).await.unwrap();
        let updated = store
            .update(&created.id, BookPatch::default())
            .await
            .unwrap();
        assert_eq!(updated, Some(created.clone()));

        store.delete(&created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let uri = require_db!();
        let store = connect(&uri).await;

        let patch = BookPatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update("no-such-id", patch).await.unwrap(), None);
    }
}
