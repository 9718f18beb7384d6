//! In-memory messages and negotiation log.
//!
//! One store backs both ports so that reading messages can join reasoning
//! from the log the same way the SQL adapter does.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ItemId, MessageId};
use crate::domain::negotiation::{DraftState, Message, NegotiationLog};
use crate::ports::{MessageRepository, NegotiationLogRepository};

#[derive(Default)]
struct State {
    messages: Vec<Message>,
    logs: Vec<NegotiationLog>,
}

impl State {
    fn pending_draft_index(&self, item_id: &ItemId) -> Option<usize> {
        self.messages
            .iter()
            .position(|m| &m.item_id == item_id && m.is_pending_draft())
    }

    /// Reasoning from the newest log entry pointing at the message.
    fn with_reasoning(&self, message: &Message) -> Message {
        let reasoning = self
            .logs
            .iter()
            .rev()
            .find(|log| log.message_id == Some(message.id))
            .map(|log| log.reasoning.clone());
        Message {
            reasoning,
            ..message.clone()
        }
    }
}

#[derive(Default)]
pub struct InMemoryNegotiationStore {
    state: Mutex<State>,
}

impl InMemoryNegotiationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn message_count(&self) -> usize {
        self.state.lock().await.messages.len()
    }

    pub async fn log_count(&self) -> usize {
        self.state.lock().await.logs.len()
    }
}

fn message_not_found(id: &MessageId) -> DomainError {
    DomainError::message_not_found(id)
}

fn not_pending(id: &MessageId) -> DomainError {
    DomainError::conflict(format!("Message {} is no longer a pending draft", id))
}

#[async_trait]
impl MessageRepository for InMemoryNegotiationStore {
    async fn create(&self, message: &Message) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if message.is_pending_draft() && state.pending_draft_index(&message.item_id).is_some() {
            return Err(DomainError::conflict(format!(
                "Item {} already has a pending draft",
                message.item_id
            )));
        }
        state.messages.push(message.clone());
        Ok(())
    }

    async fn replace_pending_draft(
        &self,
        draft: &Message,
        log: &NegotiationLog,
    ) -> Result<Option<MessageId>, DomainError> {
        let mut state = self.state.lock().await;
        let replaced = state
            .pending_draft_index(&draft.item_id)
            .map(|index| state.messages.remove(index).id);
        state.messages.push(draft.clone());
        state.logs.push(log.clone());
        Ok(replaced)
    }

    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<Message>, DomainError> {
        let state = self.state.lock().await;
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| &m.item_id == item_id)
            .map(|m| state.with_reasoning(m))
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .find(|m| &m.id == id)
            .map(|m| state.with_reasoning(m)))
    }

    async fn find_pending_draft(&self, item_id: &ItemId) -> Result<Option<Message>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .pending_draft_index(item_id)
            .map(|index| state.with_reasoning(&state.messages[index])))
    }

    async fn approve(&self, id: &MessageId) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let message = state
            .messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| message_not_found(id))?;
        if !message.is_pending_draft() {
            return Err(not_pending(id));
        }
        message.state = DraftState::Approved;
        Ok(())
    }

    async fn delete_pending_draft(&self, id: &MessageId) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let index = state
            .messages
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| message_not_found(id))?;
        if !state.messages[index].is_pending_draft() {
            return Err(not_pending(id));
        }
        state.messages.remove(index);
        Ok(())
    }
}

#[async_trait]
impl NegotiationLogRepository for InMemoryNegotiationStore {
    async fn create(&self, log: &NegotiationLog) -> Result<(), DomainError> {
        self.state.lock().await.logs.push(log.clone());
        Ok(())
    }

    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<NegotiationLog>, DomainError> {
        let state = self.state.lock().await;
        let mut logs: Vec<NegotiationLog> = state
            .logs
            .iter()
            .filter(|log| &log.item_id == item_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| a.logged_at.cmp(&b.logged_at).then(a.id.cmp(&b.id)));
        Ok(logs)
    }
}
