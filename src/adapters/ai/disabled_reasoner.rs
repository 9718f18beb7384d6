//! Reasoner used when no model is configured. Every call fails with
//! `ReasonerError::Disabled`, which the chat flow absorbs.

use async_trait::async_trait;

use crate::domain::negotiation::NegotiationDecision;
use crate::ports::{NegotiationReasoner, NegotiationRequest, ReasonerError};

#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledReasoner;

#[async_trait]
impl NegotiationReasoner for DisabledReasoner {
    async fn generate(
        &self,
        _request: NegotiationRequest,
    ) -> Result<NegotiationDecision, ReasonerError> {
        Err(ReasonerError::Disabled)
    }
}
