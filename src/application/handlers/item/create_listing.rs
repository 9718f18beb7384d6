//! CreateListingHandler - Command handler for putting an item on sale.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{Price, UserId};
use crate::domain::item::{Item, ItemError, NewListing};
use crate::ports::ItemRepository;

/// Command to create a listing.
#[derive(Debug, Clone)]
pub struct CreateListingCommand {
    pub seller_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub min_price: Option<Price>,
    pub ai_negotiation_enabled: bool,
    pub image_url: Option<String>,
}

pub struct CreateListingHandler {
    repository: Arc<dyn ItemRepository>,
}

impl CreateListingHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateListingCommand) -> Result<Item, ItemError> {
        let item = Item::list(NewListing {
            seller_id: cmd.seller_id,
            name: cmd.name,
            description: cmd.description,
            price: cmd.price,
            min_price: cmd.min_price,
            ai_negotiation_enabled: cmd.ai_negotiation_enabled,
            image_url: cmd.image_url,
        })?;

        self.repository.insert(&item).await?;

        info!(item_id = %item.id(), seller_id = %item.seller_id(), price = item.price().amount(), "listing created");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryItemRepository;
    use crate::application::handlers::test_support::seller;
    use crate::domain::item::ItemStatus;

    fn command(price: i64, min_price: Option<i64>) -> CreateListingCommand {
        CreateListingCommand {
            seller_id: seller(),
            name: "Desk lamp".to_string(),
            description: "Warm light".to_string(),
            price: Price::new(price).unwrap(),
            min_price: min_price.map(|p| Price::new(p).unwrap()),
            ai_negotiation_enabled: true,
            image_url: Some("https://img.example/lamp.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn new_listing_is_on_sale_with_baseline_price() {
        let repo = Arc::new(InMemoryItemRepository::new());
        let handler = CreateListingHandler::new(repo.clone());

        let item = handler.handle(command(5000, Some(4000))).await.unwrap();

        assert_eq!(item.status(), ItemStatus::OnSale);
        assert_eq!(item.initial_price().amount(), 5000);
        assert!(item.buyer_id().is_none());
        assert_eq!(item.image_url(), Some("https://img.example/lamp.jpg"));
        assert!(repo.find_by_id(item.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn floor_above_price_is_rejected() {
        let repo = Arc::new(InMemoryItemRepository::new());
        let handler = CreateListingHandler::new(repo.clone());

        let err = handler.handle(command(5000, Some(6000))).await.unwrap_err();

        assert!(matches!(err, ItemError::ValidationFailed { .. }));
        assert!(repo.is_empty().await);
    }
}
