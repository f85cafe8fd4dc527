//! The book record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NewBook;

/// A single book record as stored and returned by every backend.
///
/// The `id` is assigned by the storage layer at creation time and is
/// immutable afterwards; all other fields may change via partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Globally unique identifier (UUID v4), never supplied by the caller.
    pub id: String,

    /// Book title.
    pub title: String,

    /// Book author.
    pub author: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// URL of the cover image.
    #[serde(default)]
    pub cover_image_url: String,
}

impl Book {
    /// Build a record from a create payload, assigning a fresh id.
    #[must_use]
    pub fn from_new(new: NewBook) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            author: new.author,
            description: new.description,
            cover_image_url: new.cover_image_url,
        }
    }
}
