//! In-memory storage backend.
//!
//! A single process-local `Vec<Book>` behind a lock. Data is lost on restart;
//! suitable for development and testing only. The lock exists because axum
//! handlers share the store across tasks, nothing more.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Book, BookPatch, NewBook};
use crate::error::StorageResult;
use crate::storage::traits::BookStore;

/// In-memory list storage implementation.
#[derive(Default)]
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryStore {
    /// Create a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create(&self, new: NewBook) -> StorageResult<Book> {
        let book = Book::from_new(new);
        self.books.write().push(book.clone());
        Ok(book)
    }

    async fn list_all(&self) -> StorageResult<Vec<Book>> {
        Ok(self.books.read().clone())
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Book>> {
        Ok(self.books.read().iter().find(|b| b.id == id).cloned())
    }

    async fn update(&self, id: &str, patch: BookPatch) -> StorageResult<Option<Book>> {
        let mut books = self.books.write();
        let Some(book) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        patch.apply(book);
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut books = self.books.write();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: String::new(),
            cover_image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let store = MemoryStore::new();
        let a = store.create(dune()).await.unwrap();
        let b = store.create(dune()).await.unwrap();

        assert!(!a.id.is_empty());
        assert!(!b.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_after_create_round_trip() {
        let store = MemoryStore::new();
        let created = store.create(dune()).await.unwrap();

        let fetched = store.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_by_id("no-such-id").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let store = MemoryStore::new();
        let created = store.create(dune()).await.unwrap();

        let patch = BookPatch {
            author: Some("F. Herbert".to_string()),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.author, "F. Herbert");
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "");
        assert_eq!(updated.cover_image_url, "");

        // The merge is persisted, not just reflected in the return value.
        let fetched = store.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store = MemoryStore::new();
        let patch = BookPatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update("no-such-id", patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let store = MemoryStore::new();
        let created = store.create(dune()).await.unwrap();

        assert!(store.delete(&created.id).await.unwrap());
        assert_eq!(store.get_by_id(&created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_false() {
        let store = MemoryStore::new();
        assert!(!store.delete("no-such-id").await.unwrap());

        let created = store.create(dune()).await.unwrap();
        assert!(store.delete(&created.id).await.unwrap());
        // Second delete of the same id is a no-op.
        assert!(!store.delete(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_returns_exactly_created_records() {
        let store = MemoryStore::new();
        assert!(store.list_all().await.unwrap().is_empty());

        let mut ids = Vec::new();
        for i in 0..5 {
            let new = NewBook {
                title: format!("Book {i}"),
                author: "Author".to_string(),
                description: String::new(),
                cover_image_url: String::new(),
            };
            ids.push(store.create(new).await.unwrap().id);
        }

        let mut listed: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        listed.sort();
        ids.sort();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = MemoryStore::new();
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.backend_name(), "memory");
    }
}
