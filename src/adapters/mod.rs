//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Negotiation reasoners (Gemini, mock, disabled)
//! - `http` - axum REST API
//! - `memory` - In-memory storage for development and tests
//! - `postgres` - PostgreSQL storage

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{DisabledReasoner, GeminiConfig, GeminiReasoner, MockReasoner};
pub use http::AppState;
pub use memory::{InMemoryItemRepository, InMemoryNegotiationStore};
pub use postgres::{PostgresItemRepository, PostgresMessageRepository, PostgresNegotiationLogRepository};
