//! Negotiation module - chat messages, AI drafts and the pricing inputs
//! that drive them.

mod decision;
mod errors;
mod history;
mod log;
mod message;
mod pricing;

pub use decision::{AiDecision, BuyerIntent, NegotiationDecision};
pub use errors::NegotiationError;
pub use history::{reconstruct_history, HistoryEntry, Party};
pub use log::NegotiationLog;
pub use message::{DraftState, Message};
pub use pricing::{MarketContext, PricingPolicy, DEFAULT_FLOOR_PERCENT};
