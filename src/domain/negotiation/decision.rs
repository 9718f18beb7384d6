//! Reasoner verdicts and the rule that turns them into a committable price.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Price, ValidationError};

/// What the buyer was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuyerIntent {
    Negotiation,
    Agreement,
    Question,
    #[serde(other)]
    Unknown,
}

/// Action the reasoner chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiDecision {
    Accept,
    Reject,
    Counter,
    Answer,
}

impl AiDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiDecision::Accept => "ACCEPT",
            AiDecision::Reject => "REJECT",
            AiDecision::Counter => "COUNTER",
            AiDecision::Answer => "ANSWER",
        }
    }
}

impl fmt::Display for AiDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AiDecision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCEPT" => Ok(AiDecision::Accept),
            "REJECT" => Ok(AiDecision::Reject),
            "COUNTER" => Ok(AiDecision::Counter),
            "ANSWER" => Ok(AiDecision::Answer),
            other => Err(ValidationError::invalid_format(
                "decision",
                format!("unknown decision '{}'", other),
            )),
        }
    }
}

/// Structured answer from the reasoner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationDecision {
    pub intent: BuyerIntent,
    pub decision: AiDecision,
    /// Price the buyer proposed or agreed to.
    pub detected_price: Price,
    /// Price the reasoner proposes on the seller's behalf.
    pub counter_price: Price,
    /// Rationale for the seller; never shown to buyers.
    pub reasoning: String,
    /// Text addressed to the buyer.
    pub response_text: String,
}

impl NegotiationDecision {
    /// Price the draft would commit if the seller approves it.
    ///
    /// Acceptance commits the buyer's price; otherwise a positive counter
    /// price is committed; pure answers and bare rejections commit nothing.
    pub fn suggested_price(&self) -> Option<Price> {
        match self.decision {
            AiDecision::Accept => Some(self.detected_price).filter(|p| !p.is_zero()),
            _ if !self.counter_price.is_zero() => Some(self.counter_price),
            _ => None,
        }
    }
}
