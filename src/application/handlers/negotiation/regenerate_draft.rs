//! RegenerateDraftHandler - the seller asks for a different draft.
//!
//! The reasoner sees the draft being replaced and the seller's instruction.
//! The old draft is swapped out only after the new one exists, so a failed
//! regeneration leaves the seller with the draft they already had.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::negotiation::{Message, NegotiationError, NegotiationLog};
use crate::ports::{ItemRepository, MessageRepository, NegotiationReasoner};

use super::drafting::{ask_reasoner, build_request, DraftSettings};
use super::HistoryBuilder;

#[derive(Debug, Clone)]
pub struct RegenerateDraftCommand {
    pub item_id: ItemId,
    pub seller_id: UserId,
    /// Free-text guidance, e.g. "be firmer on price".
    pub instruction: String,
}

pub struct RegenerateDraftHandler {
    items: Arc<dyn ItemRepository>,
    messages: Arc<dyn MessageRepository>,
    reasoner: Arc<dyn NegotiationReasoner>,
    settings: DraftSettings,
}

impl RegenerateDraftHandler {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        messages: Arc<dyn MessageRepository>,
        reasoner: Arc<dyn NegotiationReasoner>,
        settings: DraftSettings,
    ) -> Self {
        Self {
            items,
            messages,
            reasoner,
            settings,
        }
    }

    /// # Errors
    ///
    /// - `ItemNotFound`, `Unauthorized`
    /// - `InvalidOperation` if negotiation is disabled or the listing is no
    ///   longer on sale
    /// - `NoBuyerMessage` if no buyer has written yet
    /// - `UpstreamFailure` if the reasoner fails; the old draft is kept
    pub async fn handle(&self, cmd: RegenerateDraftCommand) -> Result<Message, NegotiationError> {
        let item = self
            .items
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or(NegotiationError::ItemNotFound(cmd.item_id))?;
        item.authorize_seller(&cmd.seller_id)?;

        if !item.ai_negotiation_enabled() {
            return Err(NegotiationError::invalid_operation(
                "AI negotiation is disabled for this item",
            ));
        }
        if !item.status().is_on_sale() {
            return Err(NegotiationError::invalid_operation(format!(
                "item is {} and can no longer be negotiated",
                item.status()
            )));
        }

        let messages = self.messages.find_by_item(item.id()).await?;

        let target = messages
            .iter()
            .rev()
            .find(|m| !m.is_ai_response && !item.is_seller(&m.sender_id))
            .ok_or(NegotiationError::NoBuyerMessage(cmd.item_id))?;
        let stale = messages.iter().find(|m| m.is_pending_draft());

        let mut exclude = HashSet::from([target.id]);
        if let Some(stale) = stale {
            exclude.insert(stale.id);
        }
        let history = HistoryBuilder::assemble(&messages, item.seller_id(), &exclude);

        let request = build_request(&item, &self.settings.pricing, history, &target.content)
            .with_retry(
                cmd.instruction,
                stale.map(|m| m.content.clone()),
                stale.and_then(|m| m.reasoning.clone()),
            );

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
            target.sender_id.clone(),
            draft.id,
            &decision,
            true,
        );
        let replaced = self.messages.replace_pending_draft(&draft, &log).await?;

        info!(
            item_id = %item.id(),
            draft_id = %draft.id,
            replaced = ?replaced.map(|id| id.to_string()),
            decision = %log.decision_label(),
            "draft regenerated"
        );
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockReasoner;
    use crate::adapters::memory::{InMemoryItemRepository, InMemoryNegotiationStore};
    use crate::application::handlers::test_support::{buyer, listed_item, seller};
    use crate::domain::foundation::Price;
    use crate::domain::item::{Item, ListingEdit};
    use crate::domain::negotiation::{AiDecision, Party};
    use crate::ports::{NegotiationLogRepository, ReasonerError};

    struct Fixture {
        items: Arc<InMemoryItemRepository>,
        store: Arc<InMemoryNegotiationStore>,
        reasoner: MockReasoner,
        handler: RegenerateDraftHandler,
        item: Item,
    }

    async fn fixture(item: Item, reasoner: MockReasoner) -> Fixture {
        let items = Arc::new(InMemoryItemRepository::new());
        let store = Arc::new(InMemoryNegotiationStore::new());
        items.insert(&item).await.unwrap();
        let handler = RegenerateDraftHandler::new(
            items.clone(),
            store.clone(),
            Arc::new(reasoner.clone()),
            DraftSettings::default(),
        );
        Fixture {
            items,
            store,
            reasoner,
            handler,
            item,
        }
    }

    /// Buyer offer plus a pending draft whose reasoning is in the log.
    async fn seed_offer_and_draft(f: &Fixture) -> (Message, Message) {
        let offer = Message::human(*f.item.id(), buyer(), "6000?").unwrap();
        MessageRepository::create(f.store.as_ref(), &offer).await.unwrap();

        let decision = MockReasoner::accept(6000, "Deal at 6000!");
        let draft = Message::draft(
            *f.item.id(),
            seller(),
            decision.response_text.clone(),
            decision.suggested_price(),
            decision.reasoning.clone(),
        );
        let log = NegotiationLog::record(*f.item.id(), buyer(), draft.id, &decision, false);
        f.store.replace_pending_draft(&draft, &log).await.unwrap();
        (offer, draft)
    }

    fn regenerate(item: &Item, caller: UserId) -> RegenerateDraftCommand {
        RegenerateDraftCommand {
            item_id: *item.id(),
            seller_id: caller,
            instruction: "be firmer".to_string(),
        }
    }

    #[tokio::test]
    async fn regeneration_replaces_draft_with_retry_context() {
        let f = fixture(
            listed_item(10000, None),
            MockReasoner::new().with_decision(MockReasoner::counter(6000, 9000, "9000 is my best")),
        )
        .await;
        let (offer, stale) = seed_offer_and_draft(&f).await;

        let draft = f.handler.handle(regenerate(&f.item, seller())).await.unwrap();

        assert_eq!(draft.suggested_price, Some(Price::new(9000).unwrap()));
        let pending = f.store.find_pending_draft(f.item.id()).await.unwrap().unwrap();
        assert_eq!(pending.id, draft.id);
        assert!(f.store.find_by_id(&stale.id).await.unwrap().is_none());

        let call = &f.reasoner.calls()[0];
        assert_eq!(call.buyer_message, offer.content);
        assert_eq!(call.retry_instruction.as_deref(), Some("be firmer"));
        assert_eq!(call.previous_draft_content.as_deref(), Some("Deal at 6000!"));
        assert_eq!(call.previous_draft_reasoning.as_deref(), Some("mock ACCEPT decision"));
        assert!(call.history.is_empty());

        let logs = NegotiationLogRepository::find_by_item(f.store.as_ref(), f.item.id())
            .await
            .unwrap();
        let last = logs.last().unwrap();
        assert!(last.is_retry);
        assert_eq!(last.decision, AiDecision::Counter);
        assert_eq!(last.decision_label(), "COUNTER_RETRY");
        assert_eq!(last.message_id, Some(draft.id));
    }

    #[tokio::test]
    async fn earlier_conversation_is_kept_as_history() {
        let f = fixture(listed_item(10000, None), MockReasoner::new()).await;
        let question = Message::human(*f.item.id(), buyer(), "Any scratches?").unwrap();
        MessageRepository::create(f.store.as_ref(), &question).await.unwrap();
        let answer = Message::human(*f.item.id(), seller(), "None.").unwrap();
        MessageRepository::create(f.store.as_ref(), &answer).await.unwrap();
        seed_offer_and_draft(&f).await;

        f.handler.handle(regenerate(&f.item, seller())).await.unwrap();

        let history = &f.reasoner.calls()[0].history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Party::Buyer);
        assert_eq!(history[1].role, Party::Seller);
    }

    #[tokio::test]
    async fn regeneration_without_buyer_message_fails() {
        let f = fixture(listed_item(10000, None), MockReasoner::new()).await;
        let note = Message::human(*f.item.id(), seller(), "Price is firm").unwrap();
        MessageRepository::create(f.store.as_ref(), &note).await.unwrap();

        let err = f.handler.handle(regenerate(&f.item, seller())).await.unwrap_err();

        assert_eq!(err.to_string(), "no buyer message found to respond to");
        assert_eq!(f.reasoner.call_count(), 0);
    }

    #[tokio::test]
    async fn reasoner_failure_keeps_stale_draft() {
        let f = fixture(
            listed_item(10000, None),
            MockReasoner::new().with_error(ReasonerError::malformed("not json")),
        )
        .await;
        let (_, stale) = seed_offer_and_draft(&f).await;

        let err = f.handler.handle(regenerate(&f.item, seller())).await.unwrap_err();

        assert!(matches!(err, NegotiationError::UpstreamFailure(_)));
        let pending = f.store.find_pending_draft(f.item.id()).await.unwrap().unwrap();
        assert_eq!(pending.id, stale.id);
    }

    #[tokio::test]
    async fn only_the_seller_may_regenerate() {
        let f = fixture(listed_item(10000, None), MockReasoner::new()).await;
        seed_offer_and_draft(&f).await;

        let err = f.handler.handle(regenerate(&f.item, buyer())).await.unwrap_err();

        assert_eq!(err, NegotiationError::Unauthorized);
    }

    #[tokio::test]
    async fn disabled_negotiation_is_invalid() {
        let mut item = listed_item(10000, None);
        item.apply_edit(ListingEdit {
            ai_negotiation_enabled: Some(false),
            ..Default::default()
        })
        .unwrap();
        let f = fixture(item, MockReasoner::new()).await;
        seed_offer_and_draft(&f).await;

        let err = f.handler.handle(regenerate(&f.item, seller())).await.unwrap_err();

        assert!(matches!(err, NegotiationError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn sold_listing_cannot_be_renegotiated() {
        let f = fixture(listed_item(10000, None), MockReasoner::new()).await;
        let (_, stale) = seed_offer_and_draft(&f).await;
        let mut sold = f.item.clone();
        sold.purchase(buyer()).unwrap();
        f.items.update(&sold).await.unwrap();

        let err = f.handler.handle(regenerate(&f.item, seller())).await.unwrap_err();

        assert!(matches!(err, NegotiationError::InvalidOperation(_)));
        assert_eq!(f.reasoner.call_count(), 0);
        let pending = f.store.find_pending_draft(f.item.id()).await.unwrap().unwrap();
        assert_eq!(pending.id, stale.id);
        let logs = NegotiationLogRepository::find_by_item(f.store.as_ref(), f.item.id())
            .await
            .unwrap();
        assert!(logs.iter().all(|log| !log.is_retry));
    }
}
