//! Storage layer module.
//!
//! Trait-based storage abstraction over the three book backends: MongoDB,
//! PostgreSQL, and an in-memory list. The backend is chosen once at startup
//! by the factory.

pub mod factory;
pub mod memory;
pub mod mongo;
pub mod postgres;
pub mod traits;

pub use factory::create_store;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use postgres::PostgresStore;
pub use traits::{BookStore, DynBookStore};
