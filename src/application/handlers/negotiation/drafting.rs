//! Pieces shared by the two flows that produce drafts.

use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::foundation::Timestamp;
use crate::domain::item::Item;
use crate::domain::negotiation::{HistoryEntry, NegotiationDecision, PricingPolicy};
use crate::ports::{NegotiationReasoner, NegotiationRequest, ReasonerError};

/// Tunables for draft generation.
#[derive(Debug, Clone, Copy)]
pub struct DraftSettings {
    pub pricing: PricingPolicy,
    /// Upper bound on a single reasoner call.
    pub reasoner_timeout: Duration,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            reasoner_timeout: Duration::from_secs(20),
        }
    }
}

pub(crate) fn build_request(
    item: &Item,
    pricing: &PricingPolicy,
    history: Vec<HistoryEntry>,
    buyer_message: &str,
) -> NegotiationRequest {
    let market = pricing.market_context(item, &Timestamp::now());
    NegotiationRequest {
        current_price: item.price(),
        initial_price: item.initial_price(),
        floor_price: pricing.effective_floor(item),
        view_count: market.view_count,
        days_listed: market.days_listed,
        item_description: item.description().to_string(),
        history,
        buyer_message: buyer_message.to_string(),
        retry_instruction: None,
        previous_draft_content: None,
        previous_draft_reasoning: None,
    }
}

pub(crate) async fn ask_reasoner(
    reasoner: &dyn NegotiationReasoner,
    request: NegotiationRequest,
    limit: Duration,
) -> Result<NegotiationDecision, ReasonerError> {
    debug!(
        floor_price = request.floor_price.amount(),
        history_len = request.history.len(),
        retry = request.is_retry(),
        "calling negotiation reasoner"
    );
    match timeout(limit, reasoner.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(ReasonerError::Timeout {
            timeout_secs: limit.as_secs(),
        }),
    }
}
