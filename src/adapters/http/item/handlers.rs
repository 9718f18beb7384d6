//! HTTP handlers for listing endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    DeleteListingCommand, PurchaseItemCommand, UpdateListingCommand, ViewItemQuery,
};
use crate::domain::foundation::ItemId;
use crate::domain::item::ItemError;

use super::super::error::ApiError;
use super::super::extract::{CurrentUser, OptionalUser};
use super::super::state::AppState;
use super::dto::{CreateItemRequest, ItemListResponse, ItemResponse, UpdateItemRequest};

pub(crate) fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse::<ItemId>()
        .map_err(|_| ApiError::bad_request(format!("Invalid item ID: {}", raw)))
}

/// GET /api/items - Public listing, newest first
pub async fn list_items(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.list_items_handler().handle().await?;
    let response = ItemListResponse {
        items: items
            .iter()
            .map(|item| ItemResponse::for_viewer(item, viewer.as_ref()))
            .collect(),
    };
    Ok(Json(response))
}

/// POST /api/items - List an item for sale
pub async fn create_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = request
        .into_command(user.clone())
        .map_err(ItemError::from)?;
    let item = state.create_listing_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResponse::for_viewer(&item, Some(&user))),
    ))
}

/// GET /api/items/:id - Item detail; counts a view
pub async fn get_item(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let item = state
        .view_item_handler()
        .handle(ViewItemQuery { item_id })
        .await?;
    Ok(Json(ItemResponse::for_viewer(&item, viewer.as_ref())))
}

/// PATCH /api/items/:id - Seller edit
pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let edit = request.into_edit().map_err(ItemError::from)?;
    let item = state
        .update_listing_handler()
        .handle(UpdateListingCommand {
            item_id,
            seller_id: user.clone(),
            edit,
        })
        .await?;
    Ok(Json(ItemResponse::for_viewer(&item, Some(&user))))
}

/// DELETE /api/items/:id - Seller soft delete
pub async fn delete_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    state
        .delete_listing_handler()
        .handle(DeleteListingCommand {
            item_id,
            seller_id: user,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/items/:id/purchase - Buy at the current price
pub async fn purchase_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let item = state
        .purchase_item_handler()
        .handle(PurchaseItemCommand {
            item_id,
            buyer_id: user.clone(),
        })
        .await?;
    Ok(Json(ItemResponse::for_viewer(&item, Some(&user))))
}
