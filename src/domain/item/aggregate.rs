//! Item aggregate entity.
//!
//! A listing belongs to one seller. Its asking `price` moves during
//! negotiation while `initial_price` only changes on a manual edit.
//!
//! # Invariants
//!
//! - `buyer_id` is set if and only if `status == Sold`
//! - `min_price`, when present, never exceeds `price` at edit time
//! - Sold and deleted listings are frozen

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ItemId, Price, StateMachine, Timestamp, UserId, ValidationError,
};

use super::{ItemError, ItemStatus};

/// Maximum length for a listing name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Input for creating a listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub seller_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub min_price: Option<Price>,
    pub ai_negotiation_enabled: bool,
    pub image_url: Option<String>,
}

/// Manual edit by the seller. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ListingEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    /// `Some(None)` clears the floor.
    pub min_price: Option<Option<Price>>,
    pub ai_negotiation_enabled: Option<bool>,
    pub image_url: Option<Option<String>>,
}

/// Listing aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    price: Price,
    initial_price: Price,
    min_price: Option<Price>,
    status: ItemStatus,
    seller_id: UserId,
    buyer_id: Option<UserId>,
    view_count: u32,
    ai_negotiation_enabled: bool,
    image_url: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Optimistic concurrency counter, bumped by every persisted update.
    version: u64,
}

impl Item {
    /// Creates a new on-sale listing.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank/too long or the floor exceeds the price
    pub fn list(listing: NewListing) -> Result<Self, ItemError> {
        let name = Self::validate_name(listing.name)?;
        Self::validate_floor(listing.price, listing.min_price)?;

        let now = Timestamp::now();
        Ok(Self {
            id: ItemId::new(),
            name,
            description: listing.description,
            price: listing.price,
            initial_price: listing.price,
            min_price: listing.min_price,
            status: ItemStatus::OnSale,
            seller_id: listing.seller_id,
            buyer_id: None,
            view_count: 0,
            ai_negotiation_enabled: listing.ai_negotiation_enabled,
            image_url: listing.image_url,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Reconstitute a listing from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ItemId,
        name: String,
        description: String,
        price: Price,
        initial_price: Price,
        min_price: Option<Price>,
        status: ItemStatus,
        seller_id: UserId,
        buyer_id: Option<UserId>,
        view_count: u32,
        ai_negotiation_enabled: bool,
        image_url: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            initial_price,
            min_price,
            status,
            seller_id,
            buyer_id,
            view_count,
            ai_negotiation_enabled,
            image_url,
            created_at,
            updated_at,
            version,
        }
    }

    /// Stamp the counters a store owns after a successful write.
    pub fn with_storage_state(mut self, version: u64, view_count: u32) -> Self {
        self.version = version;
        self.view_count = view_count;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current asking price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Baseline price from creation or the last manual edit.
    pub fn initial_price(&self) -> Price {
        self.initial_price
    }

    /// Seller-set floor, if any.
    pub fn min_price(&self) -> Option<Price> {
        self.min_price
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }

    pub fn buyer_id(&self) -> Option<&UserId> {
        self.buyer_id.as_ref()
    }

    pub fn view_count(&self) -> u32 {
        self.view_count
    }

    pub fn ai_negotiation_enabled(&self) -> bool {
        self.ai_negotiation_enabled
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_seller(&self, user_id: &UserId) -> bool {
        &self.seller_id == user_id
    }

    /// # Errors
    ///
    /// - `Unauthorized` if the caller is not the seller
    pub fn authorize_seller(&self, user_id: &UserId) -> Result<(), ItemError> {
        if self.is_seller(user_id) {
            Ok(())
        } else {
            Err(ItemError::Unauthorized)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Sell the listing to `buyer_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` if the buyer is the seller
    /// - `Conflict` if the listing is not on sale
    pub fn purchase(&mut self, buyer_id: UserId) -> Result<(), ItemError> {
        if self.is_seller(&buyer_id) {
            return Err(ItemError::invalid_operation("cannot buy your own item"));
        }
        self.status = self
            .status
            .transition_to(ItemStatus::Sold)
            .map_err(|_| ItemError::conflict(format!("item is already {}", self.status)))?;
        self.buyer_id = Some(buyer_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Apply a manual edit. A new price also resets the negotiation baseline.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` if the listing is no longer on sale
    /// - `ValidationFailed` if the resulting listing is invalid
    pub fn apply_edit(&mut self, edit: ListingEdit) -> Result<(), ItemError> {
        if !self.status.is_on_sale() {
            return Err(ItemError::invalid_operation(format!(
                "cannot edit an item that is {}",
                self.status
            )));
        }

        let name = match edit.name {
            Some(name) => Self::validate_name(name)?,
            None => self.name.clone(),
        };
        let price = edit.price.unwrap_or(self.price);
        let min_price = edit.min_price.unwrap_or(self.min_price);
        Self::validate_floor(price, min_price)?;

        self.name = name;
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(new_price) = edit.price {
            self.price = new_price;
            self.initial_price = new_price;
        }
        self.min_price = min_price;
        if let Some(enabled) = edit.ai_negotiation_enabled {
            self.ai_negotiation_enabled = enabled;
        }
        if let Some(image_url) = edit.image_url {
            self.image_url = image_url;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Commit a negotiated price. The baseline stays untouched.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the listing is no longer on sale
    pub fn commit_negotiated_price(&mut self, price: Price) -> Result<(), ItemError> {
        if !self.status.is_on_sale() {
            return Err(ItemError::conflict(format!(
                "item is {} and can no longer be repriced",
                self.status
            )));
        }
        self.price = price;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Soft-delete the listing, keeping its message history intact.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` unless the listing is on sale
    pub fn soft_delete(&mut self) -> Result<(), ItemError> {
        self.status = self
            .status
            .transition_to(ItemStatus::Deleted)
            .map_err(|_| {
                ItemError::invalid_operation(format!(
                    "cannot delete an item that is {}",
                    self.status
                ))
            })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_name(name: String) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LENGTH as i64,
                trimmed.chars().count() as i64,
            ));
        }
        Ok(trimmed.to_string())
    }

    fn validate_floor(price: Price, min_price: Option<Price>) -> Result<(), ValidationError> {
        match min_price {
            Some(floor) if floor > price => Err(ValidationError::out_of_range(
                "min_price",
                0,
                price.amount(),
                floor.amount(),
            )),
            _ => Ok(()),
        }
    }
}
