//! ListMessagesHandler - the chat thread, as the requester may see it.
//!
//! Sellers see everything, pending drafts and reasoning included. Anyone
//! else sees approved messages only, with reasoning stripped.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::negotiation::{Message, NegotiationError};
use crate::ports::{ItemRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct ListMessagesQuery {
    pub item_id: ItemId,
    pub requester_id: UserId,
}

pub struct ListMessagesHandler {
    items: Arc<dyn ItemRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesHandler {
    pub fn new(items: Arc<dyn ItemRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self { items, messages }
    }

    pub async fn handle(&self, query: ListMessagesQuery) -> Result<Vec<Message>, NegotiationError> {
        let item = self
            .items
            .find_by_id(&query.item_id)
            .await?
            .ok_or(NegotiationError::ItemNotFound(query.item_id))?;

        let messages = self.messages.find_by_item(&query.item_id).await?;

        if item.is_seller(&query.requester_id) {
            return Ok(messages);
        }

        Ok(messages
            .into_iter()
            .filter(Message::is_approved)
            .map(Message::redacted)
            .collect())
    }
}
