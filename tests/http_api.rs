//! HTTP surface tests driven through the router with `oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use nego_market::adapters::ai::MockReasoner;
use nego_market::adapters::http::{api_routes, AppState};
use nego_market::adapters::memory::{InMemoryItemRepository, InMemoryNegotiationStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(reasoner: MockReasoner) -> Router {
    let store = Arc::new(InMemoryNegotiationStore::new());
    let state = AppState::new(
        Arc::new(InMemoryItemRepository::new()),
        store.clone(),
        store,
        Arc::new(reasoner),
    );
    api_routes(state)
}

async fn call(app: &Router, method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_item(app: &Router) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/items",
        Some("seller-1"),
        Some(json!({
            "name": "Film camera",
            "price": 10000,
            "min_price": 8000,
            "ai_negotiation_enabled": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn create_requires_identity() {
    let app = app(MockReasoner::new());
    let (status, body) = call(
        &app,
        "POST",
        "/api/items",
        None,
        Some(json!({"name": "Camera", "price": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn item_detail_counts_views_and_hides_floor_from_buyers() {
    let app = app(MockReasoner::new());
    let id = create_item(&app).await;

    let (status, body) = call(&app, "GET", &format!("/api/items/{}", id), Some("buyer-1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view_count"], 1);
    assert!(body.get("min_price").is_none());

    let (_, body) = call(&app, "GET", &format!("/api/items/{}", id), Some("seller-1"), None).await;
    assert_eq!(body["view_count"], 2);
    assert_eq!(body["min_price"], 8000);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = app(MockReasoner::new());

    let (status, body) = call(&app, "GET", "/api/items/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let missing = uuid::Uuid::now_v7();
    let (status, body) = call(&app, "GET", &format!("/api/items/{}", missing), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn negotiation_round_trip_over_http() {
    let app = app(
        MockReasoner::new().with_decision(MockReasoner::counter(7000, 9000, "How about 9000?")),
    );
    let id = create_item(&app).await;

    // Buyer sends an offer and learns only that a reply is being prepared.
    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/items/{}/messages", id),
        Some("buyer-1"),
        Some(json!({"content": "Can you do 7000?"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["draft_pending"], true);

    // Buyer does not see the draft; seller sees it with reasoning.
    let (_, body) = call(&app, "GET", &format!("/api/items/{}/messages", id), Some("buyer-1"), None).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);

    let (_, body) = call(&app, "GET", &format!("/api/items/{}/messages", id), Some("seller-1"), None).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    let draft = &messages[1];
    assert_eq!(draft["state"], "pending");
    assert_eq!(draft["ai_reasoning"], "mock COUNTER decision");
    let draft_id = draft["id"].as_str().unwrap().to_string();

    // Only the seller may approve.
    let (status, body) = call(&app, "POST", &format!("/api/messages/{}/approve", draft_id), Some("buyer-1"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, body) = call(&app, "POST", &format!("/api/messages/{}/approve", draft_id), Some("seller-1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["price"], 9000);
    assert_eq!(body["message"]["is_approved"], true);

    // Approving twice is a state conflict.
    let (status, _) = call(&app, "POST", &format!("/api/messages/{}/approve", draft_id), Some("seller-1"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Seller-only decision log.
    let (status, _) = call(&app, "GET", &format!("/api/items/{}/negotiation-logs", id), Some("buyer-1"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, body) = call(&app, "GET", &format!("/api/items/{}/negotiation-logs", id), Some("seller-1"), None).await;
    assert_eq!(body["logs"][0]["ai_decision"], "COUNTER");

    // Purchase at the negotiated price, then a second buyer is refused.
    let (status, body) = call(&app, "POST", &format!("/api/items/{}/purchase", id), Some("buyer-1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sold");
    assert_eq!(body["price"], 9000);

    let (status, body) = call(&app, "POST", &format!("/api/items/{}/purchase", id), Some("buyer-2"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn regenerate_without_buyer_message_is_not_found() {
    let app = app(MockReasoner::new());
    let id = create_item(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/items/{}/draft/regenerate", id),
        Some("seller-1"),
        Some(json!({"instruction": "be polite"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no buyer message found to respond to");
}

#[tokio::test]
async fn seller_edit_and_delete() {
    let app = app(MockReasoner::new());
    let id = create_item(&app).await;

    let (status, body) = call(
        &app,
        "PATCH",
        &format!("/api/items/{}", id),
        Some("seller-1"),
        Some(json!({"price": 12000, "min_price": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 12000);
    assert_eq!(body["initial_price"], 12000);
    assert!(body.get("min_price").is_none());

    let (status, _) = call(&app, "DELETE", &format!("/api/items/{}", id), Some("buyer-1"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "DELETE", &format!("/api/items/{}", id), Some("seller-1"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = call(&app, "GET", "/api/items", None, None).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}
