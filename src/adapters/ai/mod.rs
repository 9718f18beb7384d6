//! Negotiation reasoner adapters.
//!
//! - `GeminiReasoner` - Google Gemini over its REST API
//! - `MockReasoner` - Scripted replies for tests
//! - `DisabledReasoner` - Used when no API key is configured

mod disabled_reasoner;
mod gemini_reasoner;
mod mock_reasoner;

pub use disabled_reasoner::DisabledReasoner;
pub use gemini_reasoner::{
    build_prompt, parse_decision, GeminiConfig, GeminiReasoner, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use mock_reasoner::{MockReasoner, MockReply};
