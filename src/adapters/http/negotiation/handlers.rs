//! HTTP handlers for chat and draft review endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    ApproveDraftCommand, ListMessagesQuery, ListNegotiationLogsQuery, RegenerateDraftCommand,
    RejectDraftCommand, SendMessageCommand,
};
use crate::domain::foundation::MessageId;

use super::super::error::ApiError;
use super::super::extract::CurrentUser;
use super::super::item::{parse_item_id, ItemResponse};
use super::super::state::AppState;
use super::dto::{
    ApproveDraftResponse, MessageListResponse, MessageResponse, NegotiationLogListResponse,
    RegenerateDraftRequest, SendMessageRequest, SendMessageResponse,
};

fn parse_message_id(raw: &str) -> Result<MessageId, ApiError> {
    raw.parse::<MessageId>()
        .map_err(|_| ApiError::bad_request(format!("Invalid message ID: {}", raw)))
}

/// POST /api/items/:id/messages - Send a chat message
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let result = state
        .send_message_handler()
        .handle(SendMessageCommand {
            item_id,
            sender_id: user,
            content: request.content,
        })
        .await?;

    let response = SendMessageResponse {
        draft_pending: result.draft.is_some(),
        message: result.message.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/items/:id/messages - Chat thread as the caller may see it
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let messages = state
        .list_messages_handler()
        .handle(ListMessagesQuery {
            item_id,
            requester_id: user,
        })
        .await?;

    Ok(Json(MessageListResponse {
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    }))
}

/// POST /api/messages/:id/approve - Publish a draft and commit its price
pub async fn approve_draft(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let message_id = parse_message_id(&message_id)?;
    let result = state
        .approve_draft_handler()
        .handle(ApproveDraftCommand {
            message_id,
            seller_id: user.clone(),
        })
        .await?;

    Ok(Json(ApproveDraftResponse {
        item: ItemResponse::for_viewer(&result.item, Some(&user)),
        message: result.message.into(),
    }))
}

/// POST /api/messages/:id/reject - Discard a draft
pub async fn reject_draft(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let message_id = parse_message_id(&message_id)?;
    state
        .reject_draft_handler()
        .handle(RejectDraftCommand {
            message_id,
            seller_id: user,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/items/:id/draft/regenerate - Replace the draft using seller guidance
pub async fn regenerate_draft(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
    body: Option<Json<RegenerateDraftRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let instruction = body.map(|Json(r)| r.instruction).unwrap_or_default();
    let draft = state
        .regenerate_draft_handler()
        .handle(RegenerateDraftCommand {
            item_id,
            seller_id: user,
            instruction,
        })
        .await?;
    Ok(Json(MessageResponse::from(draft)))
}

/// GET /api/items/:id/negotiation-logs - Seller's decision log
pub async fn list_negotiation_logs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let logs = state
        .list_negotiation_logs_handler()
        .handle(ListNegotiationLogsQuery {
            item_id,
            seller_id: user,
        })
        .await?;

    Ok(Json(NegotiationLogListResponse {
        logs: logs.into_iter().map(Into::into).collect(),
    }))
}
