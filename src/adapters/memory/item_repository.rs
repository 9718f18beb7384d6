//! In-memory implementation of `ItemRepository`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ItemId};
use crate::domain::item::{Item, ItemStatus};
use crate::ports::ItemRepository;

/// Listing store guarded by a single async mutex, which makes the version
/// check and the write one atomic step.
#[derive(Default)]
pub struct InMemoryItemRepository {
    items: Mutex<HashMap<ItemId, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

fn not_found(id: &ItemId) -> DomainError {
    DomainError::item_not_found(id)
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: &Item) -> Result<(), DomainError> {
        let mut items = self.items.lock().await;
        if items.contains_key(item.id()) {
            return Err(DomainError::conflict(format!(
                "Item {} already exists",
                item.id()
            )));
        }
        items.insert(*item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<Item, DomainError> {
        let mut items = self.items.lock().await;
        let stored = items.get(item.id()).ok_or_else(|| not_found(item.id()))?;

        if stored.version() != item.version() {
            return Err(DomainError::conflict(format!(
                "Item {} was modified concurrently (expected version {}, found {})",
                item.id(),
                item.version(),
                stored.version()
            )));
        }

        let updated = item
            .clone()
            .with_storage_state(item.version() + 1, stored.view_count());
        items.insert(*item.id(), updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        Ok(self.items.lock().await.get(id).cloned())
    }

    async fn increment_view_count(&self, id: &ItemId) -> Result<(), DomainError> {
        let mut items = self.items.lock().await;
        let stored = items.get(id).ok_or_else(|| not_found(id))?;
        let bumped = stored
            .clone()
            .with_storage_state(stored.version(), stored.view_count().saturating_add(1));
        items.insert(*id, bumped);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>, DomainError> {
        let items = self.items.lock().await;
        let mut listed: Vec<Item> = items
            .values()
            .filter(|item| item.status() != ItemStatus::Deleted)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Price, UserId};
    use crate::domain::item::NewListing;

    fn listing(name: &str) -> Item {
        Item::list(NewListing {
            seller_id: UserId::new("seller").unwrap(),
            name: name.to_string(),
            description: "desc".to_string(),
            price: Price::new(10000).unwrap(),
            min_price: None,
            ai_negotiation_enabled: true,
            image_url: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = InMemoryItemRepository::new();
        let item = listing("Camera");
        repo.insert(&item).await.unwrap();

        let mut edited = item.clone();
        edited.commit_negotiated_price(Price::new(9000).unwrap()).unwrap();
        let stored = repo.update(&edited).await.unwrap();

        assert_eq!(stored.version(), 1);
        assert_eq!(stored.price().amount(), 9000);
    }

    #[tokio::test]
    async fn stale_update_is_a_conflict() {
        let repo = InMemoryItemRepository::new();
        let item = listing("Camera");
        repo.insert(&item).await.unwrap();

        let mut first = item.clone();
        first.commit_negotiated_price(Price::new(9000).unwrap()).unwrap();
        repo.update(&first).await.unwrap();

        let mut second = item.clone();
        second.commit_negotiated_price(Price::new(8000).unwrap()).unwrap();
        let err = repo.update(&second).await.unwrap_err();
        assert!(err.is_conflict());

        let stored = repo.find_by_id(item.id()).await.unwrap().unwrap();
        assert_eq!(stored.price().amount(), 9000);
    }

    #[tokio::test]
    async fn view_count_survives_updates_and_keeps_version() {
        let repo = InMemoryItemRepository::new();
        let item = listing("Camera");
        repo.insert(&item).await.unwrap();

        repo.increment_view_count(item.id()).await.unwrap();
        repo.increment_view_count(item.id()).await.unwrap();

        let mut edited = item.clone();
        edited.commit_negotiated_price(Price::new(9500).unwrap()).unwrap();
        let stored = repo.update(&edited).await.unwrap();

        assert_eq!(stored.view_count(), 2);
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn find_all_hides_deleted_and_lists_newest_first() {
        let repo = InMemoryItemRepository::new();
        let older = listing("Older");
        let newer = listing("Newer");
        let gone = listing("Gone");
        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();
        repo.insert(&gone).await.unwrap();

        let mut deleted = gone.clone();
        deleted.soft_delete().unwrap();
        repo.update(&deleted).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["Newer".to_string(), "Older".to_string()]);
    }

    #[tokio::test]
    async fn missing_item_reports_not_found() {
        let repo = InMemoryItemRepository::new();
        let err = repo.increment_view_count(&ItemId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemNotFound);
    }
}
