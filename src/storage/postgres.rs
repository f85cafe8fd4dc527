//! PostgreSQL relational storage backend.
//!
//! One fixed-schema `books` table, one row per book. Concurrency safety is
//! delegated to the connection pool and the server; no locking here.
//!
//! Schema:
//! ```sql
//! CREATE TABLE books (
//!     id VARCHAR(36) PRIMARY KEY,
//!     title VARCHAR(255) NOT NULL,
//!     author VARCHAR(255) NOT NULL,
//!     description VARCHAR(4000),
//!     cover_image_url VARCHAR(2048)
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use tracing::{debug, info};

use crate::config::PostgresStorageConfig;
use crate::domain::{Book, BookPatch, NewBook};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::BookStore;

/// SQLSTATE for "duplicate_table". The only error suppressed during
/// table creation; everything else propagates.
const DUPLICATE_TABLE: &str = "42P07";

/// PostgreSQL storage implementation.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to PostgreSQL and ensure the `books` table exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the pool cannot be established,
    /// or `StorageError::Query` if table creation fails for any reason other
    /// than the table already existing.
    pub async fn connect(config: &PostgresStorageConfig) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect(&config.url)
            .await
            .map_err(|e| StorageError::Connection(format!("failed to connect: {e}")))?;

        let store = Self { pool };
        store.ensure_table().await?;

        info!("PostgreSQL storage initialized");
        Ok(store)
    }

    /// Create the `books` table, treating "already exists" as success.
    ///
    /// A plain `CREATE TABLE` with the duplicate-table error suppressed, so
    /// that only that one condition is swallowed.
    async fn ensure_table(&self) -> StorageResult<()> {
        let result = sqlx::query(
            r"
            CREATE TABLE books (
                id VARCHAR(36) PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                author VARCHAR(255) NOT NULL,
                description VARCHAR(4000),
                cover_image_url VARCHAR(2048)
            )
            ",
        )
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!("created books table");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(DUPLICATE_TABLE) =>
            {
                debug!("books table already exists");
                Ok(())
            }
            Err(e) => Err(StorageError::Query(format!(
                "failed to create books table: {e}"
            ))),
        }
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parse a database row into a `Book`.
///
/// Optional columns may hold NULL; those map to empty strings.
fn row_to_book(row: &PgRow) -> StorageResult<Book> {
    let id: String = row
        .try_get("id")
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let author: String = row
        .try_get("author")
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let cover_image_url: Option<String> = row
        .try_get("cover_image_url")
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    Ok(Book {
        id,
        title,
        author,
        description: description.unwrap_or_default(),
        cover_image_url: cover_image_url.unwrap_or_default(),
    })
}

#[async_trait]
impl BookStore for PostgresStore {
    async fn create(&self, new: NewBook) -> StorageResult<Book> {
        let book = Book::from_new(new);

        sqlx::query(
            r"
            INSERT INTO books (id, title, author, description, cover_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.cover_image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Query(format!("failed to insert book: {e}")))?;

        Ok(book)
    }

    async fn list_all(&self) -> StorageResult<Vec<Book>> {
        let rows = sqlx::query("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Query(format!("failed to list books: {e}")))?;

        rows.iter().map(row_to_book).collect()
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Book>> {
        let row = sqlx::query("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Query(format!("failed to get book: {e}")))?;

        row.as_ref().map(row_to_book).transpose()
    }

    async fn update(&self, id: &str, patch: BookPatch) -> StorageResult<Option<Book>> {
        // Merge in memory, then rewrite all mutable columns. The row is
        // always written whole even for a partial patch.
        let Some(mut book) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut book);

        sqlx::query(
            r"
            UPDATE books
            SET title = $1, author = $2, description = $3, cover_image_url = $4
            WHERE id = $5
            ",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.cover_image_url)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Query(format!("failed to update book: {e}")))?;

        Ok(Some(book))
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Query(format!("failed to delete book: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(format!("health check failed: {e}")))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
