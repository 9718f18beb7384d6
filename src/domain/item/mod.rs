//! Item module - listings and their status lifecycle.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Item, ListingEdit, NewListing, MAX_NAME_LENGTH};
pub use errors::ItemError;
pub use status::ItemStatus;
