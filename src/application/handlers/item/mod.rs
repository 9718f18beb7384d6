//! Listing command and query handlers.

mod create_listing;
mod delete_listing;
mod list_items;
mod purchase_item;
mod update_listing;
mod view_item;

pub use create_listing::{CreateListingCommand, CreateListingHandler};
pub use delete_listing::{DeleteListingCommand, DeleteListingHandler};
pub use list_items::ListItemsHandler;
pub use purchase_item::{PurchaseItemCommand, PurchaseItemHandler};
pub use update_listing::{UpdateListingCommand, UpdateListingHandler};
pub use view_item::{ViewItemHandler, ViewItemQuery};
