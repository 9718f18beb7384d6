//! Axum routes for chat and draft review endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    approve_draft, list_messages, list_negotiation_logs, regenerate_draft, reject_draft,
    send_message,
};

/// Item-scoped routes, mounted under `/api/items`.
pub fn item_negotiation_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/messages", get(list_messages).post(send_message))
        .route("/:id/draft/regenerate", post(regenerate_draft))
        .route("/:id/negotiation-logs", get(list_negotiation_logs))
}

/// Message-scoped routes, mounted under `/api/messages`.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/approve", post(approve_draft))
        .route("/:id/reject", post(reject_draft))
}
