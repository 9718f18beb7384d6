//! HTTP adapter for chat, draft review and the negotiation log.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ApproveDraftResponse, MessageListResponse, MessageResponse, NegotiationLogListResponse,
    NegotiationLogResponse, RegenerateDraftRequest, SendMessageRequest, SendMessageResponse,
};
pub use routes::{item_negotiation_routes, message_routes};
