//! Application state for Axum handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::traits::BookStore;

/// Shared application state.
///
/// The store is an explicit object constructed once at startup and carried
/// through axum state; there is no ambient global.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn BookStore>) -> Self {
        Self { config, store }
    }
}
