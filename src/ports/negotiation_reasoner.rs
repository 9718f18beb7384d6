//! Negotiation Reasoner Port - the external model that drafts replies.
//!
//! The reasoner receives the listing's pricing inputs, the conversation so
//! far and the buyer's latest message, and returns a structured decision.
//! Implementations own prompt construction and response parsing; callers
//! only ever see `NegotiationDecision` or `ReasonerError`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::Price;
use crate::domain::negotiation::{HistoryEntry, NegotiationDecision, NegotiationError};

/// Port for drafting negotiation replies.
#[async_trait]
pub trait NegotiationReasoner: Send + Sync {
    /// Produce a decision for the buyer's latest message.
    ///
    /// # Errors
    ///
    /// Any `ReasonerError`. Callers decide whether the failure is fatal.
    async fn generate(
        &self,
        request: NegotiationRequest,
    ) -> Result<NegotiationDecision, ReasonerError>;
}

/// Everything the reasoner may use to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationRequest {
    pub current_price: Price,
    /// Asking price before any negotiated reduction.
    pub initial_price: Price,
    /// Lowest price the reasoner may agree to.
    pub floor_price: Price,
    pub view_count: u32,
    pub days_listed: u32,
    pub item_description: String,
    /// Prior conversation, oldest first.
    pub history: Vec<HistoryEntry>,
    pub buyer_message: String,
    /// Seller's guidance for a regeneration.
    pub retry_instruction: Option<String>,
    /// The draft being replaced, so the model can avoid repeating it.
    pub previous_draft_content: Option<String>,
    pub previous_draft_reasoning: Option<String>,
}

impl NegotiationRequest {
    /// True when this request regenerates an earlier draft.
    pub fn is_retry(&self) -> bool {
        self.retry_instruction.is_some()
    }

    /// Attach regeneration context.
    pub fn with_retry(
        mut self,
        instruction: impl Into<String>,
        previous_content: Option<String>,
        previous_reasoning: Option<String>,
    ) -> Self {
        self.retry_instruction = Some(instruction.into());
        self.previous_draft_content = previous_content;
        self.previous_draft_reasoning = previous_reasoning;
        self
    }
}

/// Reasoner failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReasonerError {
    /// No reasoner is configured.
    #[error("negotiation reasoner is disabled")]
    Disabled,

    #[error("reasoner unavailable: {message}")]
    Unavailable { message: String },

    #[error("reasoner timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("network error: {0}")]
    Network(String),

    /// The model answered, but not with a usable decision.
    #[error("malformed reasoner response: {0}")]
    MalformedResponse(String),

    #[error("reasoner authentication failed")]
    AuthenticationFailed,
}

impl ReasonerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ReasonerError::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ReasonerError::MalformedResponse(message.into())
    }
}

impl From<ReasonerError> for NegotiationError {
    fn from(err: ReasonerError) -> Self {
        NegotiationError::upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NegotiationRequest {
        NegotiationRequest {
            current_price: Price::new(10000).unwrap(),
            initial_price: Price::new(10000).unwrap(),
            floor_price: Price::new(7500).unwrap(),
            view_count: 3,
            days_listed: 1,
            item_description: "Vintage camera".to_string(),
            history: vec![],
            buyer_message: "Would you take 6000?".to_string(),
            retry_instruction: None,
            previous_draft_content: None,
            previous_draft_reasoning: None,
        }
    }

    #[test]
    fn negotiation_reasoner_is_object_safe() {
        fn _accepts_dyn(_reasoner: &dyn NegotiationReasoner) {}
    }

    #[test]
    fn with_retry_marks_request_as_retry() {
        let plain = request();
        assert!(!plain.is_retry());

        let retry = plain.with_retry("be firmer", Some("Sure, 6000".to_string()), None);
        assert!(retry.is_retry());
        assert_eq!(retry.previous_draft_content.as_deref(), Some("Sure, 6000"));
        assert!(retry.previous_draft_reasoning.is_none());
    }

    #[test]
    fn reasoner_errors_become_upstream_failures() {
        let err: NegotiationError = ReasonerError::Timeout { timeout_secs: 20 }.into();
        assert_eq!(
            err,
            NegotiationError::UpstreamFailure("reasoner timed out after 20s".to_string())
        );
    }
}
