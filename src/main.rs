//! Bookshelf API Service Entry Point
//!
//! Initializes configuration, the storage backend, and starts the HTTP
//! server.

use bookshelf_api::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
