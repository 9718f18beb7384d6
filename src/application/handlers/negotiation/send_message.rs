//! SendMessageHandler - posts a chat message and, for buyers on listings
//! with negotiation enabled, drafts a reply for the seller to review.
//!
//! Drafting is an enhancement. Once the human message is stored, nothing
//! that goes wrong while drafting fails the request.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::item::{Item, ItemStatus};
use crate::domain::negotiation::{Message, NegotiationError, NegotiationLog};
use crate::ports::{ItemRepository, MessageRepository, NegotiationReasoner};

use super::drafting::{ask_reasoner, build_request, DraftSettings};
use super::HistoryBuilder;

/// Command to post a message on a listing.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub item_id: ItemId,
    pub sender_id: UserId,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub message: Message,
    /// Pending draft produced for the seller, if any.
    pub draft: Option<Message>,
}

pub struct SendMessageHandler {
    items: Arc<dyn ItemRepository>,
    messages: Arc<dyn MessageRepository>,
    reasoner: Arc<dyn NegotiationReasoner>,
    history: HistoryBuilder,
    settings: DraftSettings,
}

impl SendMessageHandler {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        messages: Arc<dyn MessageRepository>,
        reasoner: Arc<dyn NegotiationReasoner>,
        settings: DraftSettings,
    ) -> Self {
        Self {
            items,
            history: HistoryBuilder::new(messages.clone()),
            messages,
            reasoner,
            settings,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, NegotiationError> {
        let item = self
            .items
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or(NegotiationError::ItemNotFound(cmd.item_id))?;

        if item.status() == ItemStatus::Deleted {
            return Err(NegotiationError::invalid_operation(
                "cannot message about a deleted item",
            ));
        }

        let message = Message::human(cmd.item_id, cmd.sender_id, cmd.content)?;
        self.messages.create(&message).await?;

        let draft = if Self::wants_draft(&item, &message) {
            match self.draft_reply(&item, &message).await {
                Ok(draft) => Some(draft),
                Err(err) => {
                    warn!(item_id = %item.id(), message_id = %message.id, error = %err, "skipping negotiation draft");
                    None
                }
            }
        } else {
            None
        };

        Ok(SendMessageResult { message, draft })
    }

    fn wants_draft(item: &Item, message: &Message) -> bool {
        item.ai_negotiation_enabled()
            && item.status().is_on_sale()
            && !item.is_seller(&message.sender_id)
    }

    async fn draft_reply(&self, item: &Item, buyer_message: &Message) -> Result<Message, NegotiationError> {
        let exclude = HashSet::from([buyer_message.id]);
        let history = self.history.build(item, &exclude).await?;
        let request = build_request(item, &self.settings.pricing, history, &buyer_message.content);

        let decision =
            ask_reasoner(self.reasoner.as_ref(), request, self.settings.reasoner_timeout).await?;

        let draft = Message::draft(
            *item.id(),
            item.seller_id().clone(),
            decision.response_text.clone(),
            decision.suggested_price(),
            decision.reasoning.clone(),
        );
        let log = NegotiationLog::record(
            *item.id(),
            buyer_message.sender_id.clone(),
            draft.id,
            &decision,
            false,
        );
        if let Some(superseded) = self.messages.replace_pending_draft(&draft, &log).await? {
            info!(item_id = %item.id(), superseded = %superseded, "stale draft replaced by newer buyer message");
        }

        info!(
            item_id = %item.id(),
            draft_id = %draft.id,
            decision = %decision.decision,
            "negotiation draft awaiting seller review"
        );
        Ok(draft)
    }
}
