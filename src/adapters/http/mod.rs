//! HTTP adapter - REST API over the application handlers.
//!
//! - `GET    /api/items` - public listing
//! - `POST   /api/items` - create a listing
//! - `GET    /api/items/:id` - item detail (counts a view)
//! - `PATCH  /api/items/:id` - seller edit
//! - `DELETE /api/items/:id` - seller soft delete
//! - `POST   /api/items/:id/purchase` - buy at the current price
//! - `GET    /api/items/:id/messages` - chat, filtered by requester
//! - `POST   /api/items/:id/messages` - send a chat message
//! - `POST   /api/items/:id/draft/regenerate` - seller asks for a new draft
//! - `GET    /api/items/:id/negotiation-logs` - seller-only decision log
//! - `POST   /api/messages/:id/approve` - publish a draft
//! - `POST   /api/messages/:id/reject` - discard a draft
//!
//! Callers identify themselves with the `X-User-Id` header.

mod error;
mod extract;
pub mod item;
pub mod negotiation;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use extract::{CurrentUser, OptionalUser, USER_ID_HEADER};
pub use state::AppState;

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Routes only, without transport layers.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/items",
            item::item_routes().merge(negotiation::item_negotiation_routes()),
        )
        .nest("/api/messages", negotiation::message_routes())
        .with_state(state)
}

/// The full application router with tracing, CORS and a request timeout.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    api_routes(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(allowed)
}
