//! Concurrent writers on one listing.
//!
//! Many buyers racing for the same listing must produce exactly one sale,
//! and a sale racing a price commit must never lose either write silently.

use std::sync::Arc;

use futures::future::join_all;

use nego_market::adapters::ai::MockReasoner;
use nego_market::adapters::memory::{InMemoryItemRepository, InMemoryNegotiationStore};
use nego_market::application::{
    ApproveDraftCommand, ApproveDraftHandler, PurchaseItemCommand, PurchaseItemHandler,
};
use nego_market::domain::foundation::{Price, UserId};
use nego_market::domain::item::{Item, ItemError, ItemStatus, NewListing};
use nego_market::domain::negotiation::{Message, NegotiationError, NegotiationLog};
use nego_market::ports::{ItemRepository, MessageRepository};

fn seller() -> UserId {
    UserId::new("seller-1").unwrap()
}

fn listing() -> Item {
    Item::list(NewListing {
        seller_id: seller(),
        name: "Vintage lamp".to_string(),
        description: String::new(),
        price: Price::new(10000).unwrap(),
        min_price: None,
        ai_negotiation_enabled: true,
        image_url: None,
    })
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_buyers_produce_exactly_one_sale() {
    const BUYERS: usize = 16;

    let repo = Arc::new(InMemoryItemRepository::new());
    let item = listing();
    repo.insert(&item).await.unwrap();
    let handler = Arc::new(PurchaseItemHandler::new(repo.clone(), 5));

    let tasks = (0..BUYERS).map(|n| {
        let handler = handler.clone();
        let item_id = *item.id();
        tokio::spawn(async move {
            handler
                .handle(PurchaseItemCommand {
                    item_id,
                    buyer_id: UserId::new(format!("buyer-{}", n)).unwrap(),
                })
                .await
        })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners: Vec<&Item> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, ItemError::Conflict(_))));

    let stored = repo.find_by_id(item.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), ItemStatus::Sold);
    assert_eq!(stored.buyer_id(), winners[0].buyer_id());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sale_racing_price_commit_keeps_a_consistent_outcome() {
    let repo = Arc::new(InMemoryItemRepository::new());
    let store = Arc::new(InMemoryNegotiationStore::new());
    let item = listing();
    repo.insert(&item).await.unwrap();

    let draft = Message::draft(
        *item.id(),
        seller(),
        "9000 and it's yours",
        Some(Price::new(9000).unwrap()),
        "buyer keeps coming back",
    );
    let decision = MockReasoner::counter(8000, 9000, "9000 and it's yours");
    let log = NegotiationLog::record(
        *item.id(),
        UserId::new("buyer-1").unwrap(),
        draft.id,
        &decision,
        false,
    );
    store.replace_pending_draft(&draft, &log).await.unwrap();

    let approve = ApproveDraftHandler::new(repo.clone(), store.clone(), 5);
    let purchase = PurchaseItemHandler::new(repo.clone(), 5);

    let (approved, sold) = tokio::join!(
        approve.handle(ApproveDraftCommand {
            message_id: draft.id,
            seller_id: seller(),
        }),
        purchase.handle(PurchaseItemCommand {
            item_id: *item.id(),
            buyer_id: UserId::new("buyer-1").unwrap(),
        }),
    );

    let sold = sold.unwrap();
    match approved {
        // Commit landed first: the buyer paid the negotiated price.
        Ok(result) => {
            assert_eq!(result.item.price().amount(), 9000);
            assert_eq!(sold.price().amount(), 9000);
        }
        // Sale landed first: the draft stays unapproved.
        Err(NegotiationError::Conflict(_)) => {
            assert_eq!(sold.price().amount(), 10000);
            let stored = store.find_by_id(&draft.id).await.unwrap().unwrap();
            assert!(stored.is_pending_draft());
        }
        Err(other) => panic!("unexpected approval error: {other}"),
    }

    let stored = repo.find_by_id(item.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), ItemStatus::Sold);
    assert_eq!(stored.version(), sold.version());
}
