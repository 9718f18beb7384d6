//! UpdateListingHandler - Command handler for seller edits.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::item::{Item, ItemError, ListingEdit};
use crate::ports::ItemRepository;

/// Command to edit a listing. `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateListingCommand {
    pub item_id: ItemId,
    pub seller_id: UserId,
    pub edit: ListingEdit,
}

pub struct UpdateListingHandler {
    repository: Arc<dyn ItemRepository>,
}

impl UpdateListingHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    /// A concurrent write surfaces as `Conflict`; edits are not retried
    /// because the seller made them against the state they saw.
    pub async fn handle(&self, cmd: UpdateListingCommand) -> Result<Item, ItemError> {
        let mut item = self
            .repository
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or(ItemError::NotFound(cmd.item_id))?;

        item.authorize_seller(&cmd.seller_id)?;
        item.apply_edit(cmd.edit)?;

        let item = self.repository.update(&item).await?;

        info!(item_id = %item.id(), price = item.price().amount(), "listing updated");
        Ok(item)
    }
}
