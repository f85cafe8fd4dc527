//! Request payloads for the book API.

use serde::{Deserialize, Serialize};

use crate::domain::Book;

/// Payload for creating a book.
///
/// The id is never part of this payload; the storage layer assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    /// Book title (required, non-empty).
    pub title: String,

    /// Book author (required, non-empty).
    pub author: String,

    /// Free-form description (defaults to empty).
    #[serde(default)]
    pub description: String,

    /// URL of the cover image (defaults to empty).
    #[serde(default)]
    pub cover_image_url: String,
}

impl NewBook {
    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns an error message if `title` or `author` is empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("title is required".to_string());
        }
        if self.author.is_empty() {
            return Err("author is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for a book.
///
/// Each field is present-or-absent; absent fields leave the stored value
/// unchanged. A JSON `null` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPatch {
    /// New title, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New author, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// New description, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New cover image URL, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl BookPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.cover_image_url.is_none()
    }

    /// Merge the supplied fields into `book`, field by field.
    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title.clone_from(title);
        }
        if let Some(author) = &self.author {
            book.author.clone_from(author);
        }
        if let Some(description) = &self.description {
            book.description.clone_from(description);
        }
        if let Some(cover_image_url) = &self.cover_image_url {
            book.cover_image_url.clone_from(cover_image_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_book() -> Book {
        Book {
            id: "b-1".to_string(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: "A desert planet".to_string(),
            cover_image_url: "http://example.com/dune.jpg".to_string(),
        }
    }

    #[test]
    fn test_new_book_validation() {
        let new = NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: String::new(),
            cover_image_url: String::new(),
        };
        assert!(new.validate().is_ok());

        let no_title = NewBook {
            title: String::new(),
            ..new.clone()
        };
        assert!(no_title.validate().is_err());

        let no_author = NewBook {
            author: String::new(),
            ..new
        };
        assert!(no_author.validate().is_err());
    }

    #[test]
    fn test_new_book_optional_fields_default_empty() {
        let new: NewBook =
            serde_json::from_str(r#"{"title": "Dune", "author": "Herbert"}"#).unwrap();
        assert_eq!(new.description, "");
        assert_eq!(new.cover_image_url, "");
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut book = stored_book();
        let patch = BookPatch {
            author: Some("F. Herbert".to_string()),
            ..Default::default()
        };
        patch.apply(&mut book);

        assert_eq!(book.author, "F. Herbert");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.description, "A desert planet");
        assert_eq!(book.cover_image_url, "http://example.com/dune.jpg");
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut book = stored_book();
        let patch = BookPatch::default();
        assert!(patch.is_empty());

        patch.apply(&mut book);
        assert_eq!(book, stored_book());
    }

    #[test]
    fn test_patch_deserializes_missing_and_null_as_absent() {
        let patch: BookPatch = serde_json::from_str(r#"{"title": "Messiah"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Messiah"));
        assert!(patch.author.is_none());

        let patch: BookPatch =
            serde_json::from_str(r#"{"title": "Messiah", "author": null}"#).unwrap();
        assert!(patch.author.is_none());
        assert!(!patch.is_empty());
    }
}
