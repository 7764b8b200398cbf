//! Forest Service Library
//!
//! HTTP handlers, response envelopes, and router for the forest feature API.
//! This library is used by both the forest-service binary and integration
//! tests, which run the same router against an in-memory store.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use forest_store::FeatureStore;

/// Application state shared across handlers.
///
/// Constructed once at startup after the store has connected and
/// provisioned; handlers never reconnect lazily.
pub struct AppState {
    /// Read-only shared handle to the feature store.
    pub store: Arc<dyn FeatureStore>,
}

/// Build the API router on top of the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/items", get(handlers::read_items))
        .route("/item/:item_id", get(handlers::read_item))
        .route(
            "/items/forest_type/:forest_type",
            get(handlers::read_items_by_forest_type),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{
    ErrorResponse, ForestTypeQuery, Greeting, ItemsResponse, PagedItemsResponse,
};
