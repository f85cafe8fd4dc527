//! Router setup and configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{books, health};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    // Book CRUD routes
    let book_routes = Router::new()
        .route("/book", post(books::create_book).get(books::list_books))
        .route(
            "/book/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        );

    Router::new()
        .merge(health_routes)
        .merge(book_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
