//! Book CRUD handlers.
//!
//! Thin glue: each handler translates an HTTP request into one `BookStore`
//! call and maps the result back. Not-found (`None`/`false`) becomes 404
//! here; storage never raises it as an error.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::state::AppState;
use crate::domain::{Book, BookPatch, NewBook};
use crate::error::{AppError, Result};

/// Create a new book.
///
/// Validates that `title` and `author` are present and non-empty before
/// touching storage, then returns 201 with the persisted record.
///
/// # Errors
///
/// Returns an error if validation fails or the backend call fails.
pub async fn create_book(
    State(state): State<AppState>,
    Json(new): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>)> {
    new.validate().map_err(AppError::BadRequest)?;

    let book = state.store.create(new).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books.
///
/// # Errors
///
/// Returns an error if the backend call fails.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>> {
    let books = state.store.list_all().await?;
    Ok(Json(books))
}

/// Get a book by id.
///
/// # Errors
///
/// Returns 404 if no book has that id.
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>> {
    let book = state.store.get_by_id(&id).await?;
    book.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))
}

/// Partially update a book.
///
/// Only the supplied fields change; the full updated record is returned.
///
/// # Errors
///
/// Returns 404 if no book has that id.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<Book>> {
    let book = state.store.update(&id, patch).await?;
    book.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))
}

/// Delete a book.
///
/// # Errors
///
/// Returns 404 if no book had that id.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.store.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("book {id}")))
    }
}
