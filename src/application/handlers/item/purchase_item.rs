//! PurchaseItemHandler - Command handler for buying a listing.
//!
//! The sale is committed with a version check, so of several concurrent
//! buyers exactly one succeeds; the others re-read, find the listing sold
//! and get `Conflict`.

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::commit::commit_with_retry;
use crate::domain::foundation::{ItemId, UserId};
use crate::domain::item::{Item, ItemError};
use crate::ports::ItemRepository;

/// Command to purchase a listing.
#[derive(Debug, Clone)]
pub struct PurchaseItemCommand {
    pub item_id: ItemId,
    pub buyer_id: UserId,
}

pub struct PurchaseItemHandler {
    repository: Arc<dyn ItemRepository>,
    max_attempts: u32,
}

impl PurchaseItemHandler {
    pub fn new(repository: Arc<dyn ItemRepository>, max_attempts: u32) -> Self {
        Self {
            repository,
            max_attempts,
        }
    }

    pub async fn handle(&self, cmd: PurchaseItemCommand) -> Result<Item, ItemError> {
        let buyer_id = cmd.buyer_id;
        let item = commit_with_retry(
            self.repository.as_ref(),
            &cmd.item_id,
            self.max_attempts,
            |item| item.purchase(buyer_id.clone()),
        )
        .await?;

        info!(item_id = %item.id(), buyer_id = %buyer_id, price = item.price().amount(), "item sold");
        Ok(item)
    }
}
