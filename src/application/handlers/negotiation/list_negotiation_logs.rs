//! ListNegotiationLogsHandler - the seller's audit view of reasoner decisions.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::negotiation::{NegotiationError, NegotiationLog};
use crate::ports::{ItemRepository, NegotiationLogRepository};

#[derive(Debug, Clone)]
pub struct ListNegotiationLogsQuery {
    pub item_id: ItemId,
    pub seller_id: UserId,
}

pub struct ListNegotiationLogsHandler {
    items: Arc<dyn ItemRepository>,
    logs: Arc<dyn NegotiationLogRepository>,
}

impl ListNegotiationLogsHandler {
    pub fn new(items: Arc<dyn ItemRepository>, logs: Arc<dyn NegotiationLogRepository>) -> Self {
        Self { items, logs }
    }

    pub async fn handle(
        &self,
        query: ListNegotiationLogsQuery,
    ) -> Result<Vec<NegotiationLog>, NegotiationError> {
        let item = self
            .items
            .find_by_id(&query.item_id)
            .await?
            .ok_or(NegotiationError::ItemNotFound(query.item_id))?;
        item.authorize_seller(&query.seller_id)?;

        Ok(self.logs.find_by_item(&query.item_id).await?)
    }
}
