//! RejectDraftHandler - the seller discards a pending draft.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{MessageId, UserId};
use crate::domain::negotiation::NegotiationError;
use crate::ports::{ItemRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct RejectDraftCommand {
    pub message_id: MessageId,
    pub seller_id: UserId,
}

pub struct RejectDraftHandler {
    items: Arc<dyn ItemRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl RejectDraftHandler {
    pub fn new(items: Arc<dyn ItemRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self { items, messages }
    }

    /// Deletes the draft. The listing's price is never touched.
    pub async fn handle(&self, cmd: RejectDraftCommand) -> Result<(), NegotiationError> {
        let mut message = self
            .messages
            .find_by_id(&cmd.message_id)
            .await?
            .ok_or(NegotiationError::MessageNotFound(cmd.message_id))?;

        let item = self
            .items
            .find_by_id(&message.item_id)
            .await?
            .ok_or(NegotiationError::ItemNotFound(message.item_id))?;
        item.authorize_seller(&cmd.seller_id)?;

        message.reject()?;
        self.messages.delete_pending_draft(&message.id).await?;

        info!(item_id = %item.id(), message_id = %message.id, "draft rejected");
        Ok(())
    }
}
