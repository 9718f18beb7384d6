//! Append-only audit trail of reasoner decisions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ItemId, MessageId, NegotiationLogId, Price, Timestamp, UserId, ValidationError,
};

use super::{AiDecision, NegotiationDecision};

const RETRY_SUFFIX: &str = "_RETRY";

/// One reasoner decision, recorded for the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationLog {
    pub id: NegotiationLogId,
    pub item_id: ItemId,
    /// Buyer whose message was answered.
    pub user_id: UserId,
    /// Draft produced alongside this entry.
    pub message_id: Option<MessageId>,
    pub proposed_price: Price,
    pub decision: AiDecision,
    /// True when the entry came from a seller-requested regeneration.
    pub is_retry: bool,
    pub counter_price: Price,
    pub reasoning: String,
    pub logged_at: Timestamp,
}

impl NegotiationLog {
    /// Record a reasoner decision that produced `draft_id`.
    pub fn record(
        item_id: ItemId,
        buyer_id: UserId,
        draft_id: MessageId,
        decision: &NegotiationDecision,
        is_retry: bool,
    ) -> Self {
        Self {
            id: NegotiationLogId::new(),
            item_id,
            user_id: buyer_id,
            message_id: Some(draft_id),
            proposed_price: decision.detected_price,
            decision: decision.decision,
            is_retry,
            counter_price: decision.counter_price,
            reasoning: decision.reasoning.clone(),
            logged_at: Timestamp::now(),
        }
    }

    /// Stored label, e.g. `COUNTER` or `COUNTER_RETRY`.
    pub fn decision_label(&self) -> String {
        if self.is_retry {
            format!("{}{}", self.decision.as_str(), RETRY_SUFFIX)
        } else {
            self.decision.as_str().to_string()
        }
    }

    /// Split a stored label back into decision and retry flag.
    pub fn parse_decision_label(label: &str) -> Result<(AiDecision, bool), ValidationError> {
        match label.strip_suffix(RETRY_SUFFIX) {
            Some(base) => Ok((base.parse()?, true)),
            None => Ok((label.parse()?, false)),
        }
    }
}
