//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the marketplace domain.

mod errors;
mod ids;
mod price;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ItemId, MessageId, NegotiationLogId, UserId};
pub use price::Price;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
