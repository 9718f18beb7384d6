//! Ports - Interfaces for external adapters.
//!
//! Ports define the contracts between the application core and the outside
//! world: storage for listings, messages and the negotiation audit trail,
//! plus the reasoner that drafts negotiation replies.

mod item_repository;
mod message_repository;
mod negotiation_log_repository;
mod negotiation_reasoner;

pub use item_repository::ItemRepository;
pub use message_repository::MessageRepository;
pub use negotiation_log_repository::NegotiationLogRepository;
pub use negotiation_reasoner::{NegotiationReasoner, NegotiationRequest, ReasonerError};
