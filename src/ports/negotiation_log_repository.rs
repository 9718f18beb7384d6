//! Negotiation log repository port (append-only).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId};
use crate::domain::negotiation::NegotiationLog;

#[async_trait]
pub trait NegotiationLogRepository: Send + Sync {
    /// Append an entry. Entries are never updated.
    async fn create(&self, log: &NegotiationLog) -> Result<(), DomainError>;

    /// Entries for a listing, oldest first.
    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<NegotiationLog>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiation_log_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn NegotiationLogRepository) {}
    }
}
