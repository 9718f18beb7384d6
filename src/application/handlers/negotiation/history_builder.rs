//! HistoryBuilder - assembles reasoner context from stored messages.
//!
//! Callers pass the ids to leave out (the buyer message being answered,
//! the draft being replaced). Pending drafts are always left out as well:
//! the buyer never saw them, so they are not part of the conversation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::{MessageId, UserId};
use crate::domain::item::Item;
use crate::domain::negotiation::{reconstruct_history, HistoryEntry, Message, NegotiationError};
use crate::ports::MessageRepository;

pub struct HistoryBuilder {
    messages: Arc<dyn MessageRepository>,
}

impl HistoryBuilder {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Load the listing's messages and build its history.
    pub async fn build(
        &self,
        item: &Item,
        exclude: &HashSet<MessageId>,
    ) -> Result<Vec<HistoryEntry>, NegotiationError> {
        let messages = self.messages.find_by_item(item.id()).await?;
        Ok(Self::assemble(&messages, item.seller_id(), exclude))
    }

    /// Build history from messages that are already loaded.
    pub fn assemble(
        messages: &[Message],
        seller_id: &UserId,
        exclude: &HashSet<MessageId>,
    ) -> Vec<HistoryEntry> {
        let mut skip = exclude.clone();
        skip.extend(
            messages
                .iter()
                .filter(|m| m.is_pending_draft())
                .map(|m| m.id),
        );
        reconstruct_history(messages, seller_id, &skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryNegotiationStore;
    use crate::application::handlers::test_support::{buyer, listed_item, log_for, seller};
    use crate::domain::foundation::Price;
    use crate::domain::negotiation::Party;

    #[tokio::test]
    async fn excludes_requested_ids_and_pending_drafts() {
        let store = Arc::new(InMemoryNegotiationStore::new());
        let item = listed_item(10000, None);

        let question = Message::human(*item.id(), buyer(), "Is it scratched?").unwrap();
        let answer = Message::human(*item.id(), seller(), "Barely.").unwrap();
        let offer = Message::human(*item.id(), buyer(), "7000?").unwrap();
        let draft = Message::draft(
            *item.id(),
            seller(),
            "8500?",
            Some(Price::new(8500).unwrap()),
            "keep it high",
        );
        for message in [&question, &answer, &offer] {
            store.create(message).await.unwrap();
        }
        store.replace_pending_draft(&draft, &log_for(&draft)).await.unwrap();

        let builder = HistoryBuilder::new(store);
        let exclude = HashSet::from([offer.id]);
        let history = builder.build(&item, &exclude).await.unwrap();

        assert_eq!(
            history,
            vec![
                HistoryEntry::new(Party::Buyer, "Is it scratched?"),
                HistoryEntry::new(Party::Seller, "Barely."),
            ]
        );
    }

    #[test]
    fn approved_drafts_count_as_seller_lines() {
        let item = listed_item(10000, None);
        let mut draft = Message::draft(*item.id(), seller(), "9000 then", None, "r");
        draft.approve().unwrap();

        let history = HistoryBuilder::assemble(&[draft], &seller(), &HashSet::new());

        assert_eq!(history, vec![HistoryEntry::new(Party::Seller, "9000 then")]);
    }
}
