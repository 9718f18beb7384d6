//! DeleteListingHandler - soft-deletes a listing so its messages stay
//! attached to a row.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::item::ItemError;
use crate::ports::ItemRepository;

#[derive(Debug, Clone)]
pub struct DeleteListingCommand {
    pub item_id: ItemId,
    pub seller_id: UserId,
}

pub struct DeleteListingHandler {
    repository: Arc<dyn ItemRepository>,
}

impl DeleteListingHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteListingCommand) -> Result<(), ItemError> {
        let mut item = self
            .repository
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or(ItemError::NotFound(cmd.item_id))?;

        item.authorize_seller(&cmd.seller_id)?;
        item.soft_delete()?;
        self.repository.update(&item).await?;

        info!(item_id = %cmd.item_id, "listing deleted");
        Ok(())
    }
}
