//! HTTP DTOs for chat and draft review endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::negotiation::{DraftState, Message, NegotiationLog};

use super::super::item::ItemResponse;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Seller guidance for the next draft. May be empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegenerateDraftRequest {
    #[serde(default)]
    pub instruction: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub item_id: String,
    pub sender_id: String,
    pub content: String,
    pub is_ai_response: bool,
    pub is_approved: bool,
    pub state: DraftState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            item_id: message.item_id.to_string(),
            sender_id: message.sender_id.to_string(),
            is_approved: message.is_approved(),
            content: message.content,
            is_ai_response: message.is_ai_response,
            state: message.state,
            suggested_price: message.suggested_price.map(|p| p.amount()),
            ai_reasoning: message.reasoning,
            created_at: message.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

/// Reply to a sent message. The draft itself is only visible to the seller
/// through the message list.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub message: MessageResponse,
    pub draft_pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApproveDraftResponse {
    pub message: MessageResponse,
    pub item: ItemResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct NegotiationLogResponse {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub proposed_price: i64,
    pub ai_decision: String,
    pub counter_price: i64,
    pub ai_reasoning: String,
    pub log_time: String,
}

impl From<NegotiationLog> for NegotiationLogResponse {
    fn from(log: NegotiationLog) -> Self {
        Self {
            ai_decision: log.decision_label(),
            id: log.id.to_string(),
            item_id: log.item_id.to_string(),
            user_id: log.user_id.to_string(),
            message_id: log.message_id.map(|id| id.to_string()),
            proposed_price: log.proposed_price.amount(),
            counter_price: log.counter_price.amount(),
            ai_reasoning: log.reasoning,
            log_time: log.logged_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NegotiationLogListResponse {
    pub logs: Vec<NegotiationLogResponse>,
}
