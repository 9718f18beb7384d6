//! HTTP DTOs for listing endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::CreateListingCommand;
use crate::domain::foundation::{Price, UserId, ValidationError};
use crate::domain::item::{Item, ItemStatus, ListingEdit};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub ai_negotiation_enabled: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateItemRequest {
    pub fn into_command(self, seller_id: UserId) -> Result<CreateListingCommand, ValidationError> {
        Ok(CreateListingCommand {
            seller_id,
            name: self.name,
            description: self.description,
            price: Price::new(self.price)?,
            min_price: self.min_price.map(Price::new).transpose()?,
            ai_negotiation_enabled: self.ai_negotiation_enabled,
            image_url: self.image_url,
        })
    }
}

/// Partial edit. Absent fields are untouched; `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub min_price: Option<Option<i64>>,
    #[serde(default)]
    pub ai_negotiation_enabled: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

impl UpdateItemRequest {
    pub fn into_edit(self) -> Result<ListingEdit, ValidationError> {
        Ok(ListingEdit {
            name: self.name,
            description: self.description,
            price: self.price.map(Price::new).transpose()?,
            min_price: match self.min_price {
                Some(floor) => Some(floor.map(Price::new).transpose()?),
                None => None,
            },
            ai_negotiation_enabled: self.ai_negotiation_enabled,
            image_url: self.image_url,
        })
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub initial_price: i64,
    /// Only shown to the seller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    pub status: ItemStatus,
    pub seller_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<String>,
    pub view_count: u32,
    pub ai_negotiation_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ItemResponse {
    /// Render `item` for `viewer`; the floor price is the seller's secret.
    pub fn for_viewer(item: &Item, viewer: Option<&UserId>) -> Self {
        let is_seller = viewer.is_some_and(|v| item.is_seller(v));
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            price: item.price().amount(),
            initial_price: item.initial_price().amount(),
            min_price: item
                .min_price()
                .filter(|_| is_seller)
                .map(|p| p.amount()),
            status: item.status(),
            seller_id: item.seller_id().to_string(),
            buyer_id: item.buyer_id().map(|b| b.to_string()),
            view_count: item.view_count(),
            ai_negotiation_enabled: item.ai_negotiation_enabled(),
            image_url: item.image_url().map(str::to_string),
            created_at: item.created_at().as_datetime().to_rfc3339(),
            updated_at: item.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
}
