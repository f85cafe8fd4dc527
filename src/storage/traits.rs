//! Storage trait definition.
//!
//! `BookStore` is the uniform interface every persistence backend implements,
//! enabling swapping between backends without changing the API layer.

use async_trait::async_trait;

use crate::domain::{Book, BookPatch, NewBook};
use crate::error::StorageResult;

/// CRUD operations over the book collection.
///
/// Semantics are identical across backends. Not-found is signalled through
/// `Option` for lookups and `bool` for deletes, never through an error.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a new book, assigning it a fresh unique id.
    ///
    /// Returns the persisted record including the generated id.
    async fn create(&self, new: NewBook) -> StorageResult<Book>;

    /// Return all records in backend-native order (possibly empty).
    async fn list_all(&self) -> StorageResult<Vec<Book>>;

    /// Return the record with the given id, or `None` if absent.
    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Book>>;

    /// Merge the supplied fields into the existing record.
    ///
    /// Fields absent from the patch are left unchanged. Returns the full
    /// updated record, or `None` if no record has that id.
    async fn update(&self, id: &str, patch: BookPatch) -> StorageResult<Option<Book>>;

    /// Remove the record with the given id.
    ///
    /// Returns whether a record was actually removed; deleting an absent id
    /// is a no-op, never an error.
    async fn delete(&self, id: &str) -> StorageResult<bool>;

    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}

/// Trait object alias for `BookStore`.
pub type DynBookStore = dyn BookStore;
