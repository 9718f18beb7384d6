//! Application handlers.
//!
//! One handler struct per command or query. Handlers hold their ports as
//! `Arc<dyn Port>` and expose a single `handle` method.

mod commit;
pub mod item;
pub mod negotiation;

#[cfg(test)]
pub(crate) mod test_support;
