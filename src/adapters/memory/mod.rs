//! In-memory storage adapters.
//!
//! Used by tests and by local runs without `database.url`. Not permitted in
//! production; the configuration layer refuses that combination.

mod item_repository;
mod negotiation_store;

pub use item_repository::InMemoryItemRepository;
pub use negotiation_store::InMemoryNegotiationStore;
