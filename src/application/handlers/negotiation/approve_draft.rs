//! ApproveDraftHandler - the seller accepts a pending draft.
//!
//! A draft that carries a price commits it to the listing first. If that
//! commit fails the draft stays pending; approval never goes through with a
//! stale price.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::commit::commit_with_retry;
use crate::domain::foundation::{MessageId, UserId};
use crate::domain::item::{Item, ItemError};
use crate::domain::negotiation::{Message, NegotiationError};
use crate::ports::{ItemRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct ApproveDraftCommand {
    pub message_id: MessageId,
    pub seller_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ApproveDraftResult {
    pub message: Message,
    pub item: Item,
}

pub struct ApproveDraftHandler {
    items: Arc<dyn ItemRepository>,
    messages: Arc<dyn MessageRepository>,
    max_attempts: u32,
}

impl ApproveDraftHandler {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        messages: Arc<dyn MessageRepository>,
        max_attempts: u32,
    ) -> Self {
        Self {
            items,
            messages,
            max_attempts,
        }
    }

    pub async fn handle(&self, cmd: ApproveDraftCommand) -> Result<ApproveDraftResult, NegotiationError> {
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

        // Validates the transition before anything is written.
        message.approve()?;

        let item = match message.committable_price() {
            Some(price) => {
                let seller_id = cmd.seller_id.clone();
                commit_with_retry(self.items.as_ref(), &message.item_id, self.max_attempts, |item| {
                    item.authorize_seller(&seller_id)?;
                    item.commit_negotiated_price(price)
                })
                .await?
            }
            None if item.status().is_on_sale() => item,
            None => {
                return Err(ItemError::conflict(format!(
                    "item is {} and no longer negotiable",
                    item.status()
                ))
                .into())
            }
        };

        self.messages.approve(&message.id).await?;

        info!(
            item_id = %item.id(),
            message_id = %message.id,
            price = item.price().amount(),
            "draft approved"
        );
        Ok(ApproveDraftResult { message, item })
    }
}
