//! Axum routes for listing endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_item, delete_item, get_item, list_items, purchase_item, update_item};

/// Mounted under `/api/items`.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).patch(update_item).delete(delete_item))
        .route("/:id/purchase", post(purchase_item))
}
