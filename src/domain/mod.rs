//! Domain models for the book service.
//!
//! The book record itself plus the request payloads the API accepts.

pub mod book;
pub mod dto;

pub use book::Book;
pub use dto::{BookPatch, NewBook};
