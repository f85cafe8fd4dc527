//! HTTP request handlers.

pub mod books;
pub mod health;
