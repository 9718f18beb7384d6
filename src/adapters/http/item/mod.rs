//! HTTP adapter for listing endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateItemRequest, ItemListResponse, ItemResponse, UpdateItemRequest};
pub(crate) use handlers::parse_item_id;
pub use routes::item_routes;
