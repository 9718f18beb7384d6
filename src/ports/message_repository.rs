//! Message repository port.
//!
//! Implementations guarantee that at most one pending AI draft exists per
//! listing: `create` refuses a second one and `replace_pending_draft` swaps
//! the old draft for the new one atomically. The new draft's negotiation log
//! entry is written in the same unit, so a stored draft always has its
//! reasoning.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId, MessageId};
use crate::domain::negotiation::{Message, NegotiationLog};

/// Repository port for chat messages and drafts.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a message.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the message is a pending draft and one already exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, message: &Message) -> Result<(), DomainError>;

    /// Atomically delete the listing's pending draft (if any), insert
    /// `draft` in its place and append `log`. Nothing is written if any step
    /// fails. Returns the id of the replaced draft.
    async fn replace_pending_draft(
        &self,
        draft: &Message,
        log: &NegotiationLog,
    ) -> Result<Option<MessageId>, DomainError>;

    /// All messages of a listing, oldest first, with reasoning joined from
    /// the negotiation log where available.
    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<Message>, DomainError>;

    /// Find a message by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError>;

    /// The listing's pending AI draft, if any.
    async fn find_pending_draft(&self, item_id: &ItemId) -> Result<Option<Message>, DomainError>;

    /// Mark a pending draft approved.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if absent
    /// - `Conflict` if the message is no longer pending
    async fn approve(&self, id: &MessageId) -> Result<(), DomainError>;

    /// Delete a pending draft.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if absent
    /// - `Conflict` if the message is no longer pending
    async fn delete_pending_draft(&self, id: &MessageId) -> Result<(), DomainError>;
}
