//! Item repository port.
//!
//! # Concurrency
//!
//! `update` is a compare-and-swap on `Item::version`. Two writers that read
//! the same version cannot both succeed; the loser gets `Conflict` and must
//! re-read. View counting is deliberately outside the versioned state so
//! that browsing never invalidates a pending purchase or price commit.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId};
use crate::domain::item::Item;

/// Repository port for listing persistence.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new listing.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, item: &Item) -> Result<(), DomainError>;

    /// Persist a mutated listing if the stored version still equals
    /// `item.version()`. Returns the stored listing with its new version.
    ///
    /// The view counter is never overwritten by this call.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the listing does not exist
    /// - `Conflict` if another writer got there first
    /// - `DatabaseError` on persistence failure
    async fn update(&self, item: &Item) -> Result<Item, DomainError>;

    /// Find a listing by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, DomainError>;

    /// Bump the view counter by one.
    async fn increment_view_count(&self, id: &ItemId) -> Result<(), DomainError>;

    /// All listings that are not deleted, newest first.
    async fn find_all(&self) -> Result<Vec<Item>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ItemRepository) {}
    }
}
