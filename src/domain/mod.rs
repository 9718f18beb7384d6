//! Domain layer - listings, negotiation and their shared vocabulary.

pub mod foundation;
pub mod item;
pub mod negotiation;
