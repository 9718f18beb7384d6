//! ViewItemHandler - Query handler for the item detail page.
//!
//! Counting the view is best-effort: a failed increment is logged and the
//! listing is still returned.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::ItemId;
use crate::domain::item::{Item, ItemError};
use crate::ports::ItemRepository;

#[derive(Debug, Clone)]
pub struct ViewItemQuery {
    pub item_id: ItemId,
}

pub struct ViewItemHandler {
    repository: Arc<dyn ItemRepository>,
}

impl ViewItemHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ViewItemQuery) -> Result<Item, ItemError> {
        if let Err(err) = self.repository.increment_view_count(&query.item_id).await {
            warn!(item_id = %query.item_id, error = %err, "failed to count item view");
        }

        self.repository
            .find_by_id(&query.item_id)
            .await?
            .ok_or(ItemError::NotFound(query.item_id))
    }
}
