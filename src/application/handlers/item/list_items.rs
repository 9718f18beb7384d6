//! ListItemsHandler - Query handler for the public catalogue.

use std::sync::Arc;

use crate::domain::item::{Item, ItemError};
use crate::ports::ItemRepository;

pub struct ListItemsHandler {
    repository: Arc<dyn ItemRepository>,
}

impl ListItemsHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    /// Listings that are on sale or sold, newest first.
    pub async fn handle(&self) -> Result<Vec<Item>, ItemError> {
        Ok(self.repository.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryItemRepository;
    use crate::application::handlers::test_support::{buyer, listed_item};

    #[tokio::test]
    async fn sold_items_stay_listed() {
        let repo = Arc::new(InMemoryItemRepository::new());
        let mut sold = listed_item(10000, None);
        repo.insert(&sold).await.unwrap();
        sold.purchase(buyer()).unwrap();
        repo.update(&sold).await.unwrap();
        let on_sale = listed_item(5000, None);
        repo.insert(&on_sale).await.unwrap();

        let items = ListItemsHandler::new(repo).handle().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), on_sale.id());
    }
}
