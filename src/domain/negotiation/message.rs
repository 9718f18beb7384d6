//! Chat messages and AI drafts.
//!
//! Human messages are visible immediately. An AI draft starts `Pending` and
//! waits for the seller, who either approves it (it becomes an ordinary
//! visible message) or rejects it (it is deleted).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ItemId, MessageId, Price, StateMachine, Timestamp, UserId, ValidationError,
};

use super::NegotiationError;

/// Review state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftState {
    /// AI draft awaiting seller review.
    Pending,
    /// Visible to the buyer.
    Approved,
    /// Discarded by the seller.
    Rejected,
}

impl DraftState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftState::Pending => "pending",
            DraftState::Approved => "approved",
            DraftState::Rejected => "rejected",
        }
    }
}

impl StateMachine for DraftState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DraftState::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DraftState::Pending => vec![DraftState::Approved, DraftState::Rejected],
            DraftState::Approved | DraftState::Rejected => vec![],
        }
    }
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DraftState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DraftState::Pending),
            "approved" => Ok(DraftState::Approved),
            "rejected" => Ok(DraftState::Rejected),
            other => Err(ValidationError::invalid_format(
                "state",
                format!("unknown draft state '{}'", other),
            )),
        }
    }
}

/// A chat message on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub item_id: ItemId,
    pub sender_id: UserId,
    pub content: String,
    pub is_ai_response: bool,
    pub state: DraftState,
    /// Price this message commits to the listing when approved.
    pub suggested_price: Option<Price>,
    /// Seller-only rationale joined from the negotiation log.
    pub reasoning: Option<String>,
    pub created_at: Timestamp,
}

impl Message {
    /// A message typed by a buyer or the seller. Visible immediately.
    pub fn human(
        item_id: ItemId,
        sender_id: UserId,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            id: MessageId::new(),
            item_id,
            sender_id,
            content,
            is_ai_response: false,
            state: DraftState::Approved,
            suggested_price: None,
            reasoning: None,
            created_at: Timestamp::now(),
        })
    }

    /// An AI-authored reply written on the seller's behalf, pending review.
    pub fn draft(
        item_id: ItemId,
        seller_id: UserId,
        content: impl Into<String>,
        suggested_price: Option<Price>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            item_id,
            sender_id: seller_id,
            content: content.into(),
            is_ai_response: true,
            state: DraftState::Pending,
            suggested_price,
            reasoning: Some(reasoning.into()),
            created_at: Timestamp::now(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.state == DraftState::Approved
    }

    /// True for an AI draft still awaiting review.
    pub fn is_pending_draft(&self) -> bool {
        self.is_ai_response && self.state == DraftState::Pending
    }

    /// Price to commit on approval; zero means "no price change".
    pub fn committable_price(&self) -> Option<Price> {
        self.suggested_price.filter(|p| !p.is_zero())
    }

    /// # Errors
    ///
    /// - `InvalidOperation` if the message is not a pending draft
    pub fn approve(&mut self) -> Result<(), NegotiationError> {
        self.state = self.transition(DraftState::Approved)?;
        Ok(())
    }

    /// # Errors
    ///
    /// - `InvalidOperation` if the message is not a pending draft
    pub fn reject(&mut self) -> Result<(), NegotiationError> {
        self.state = self.transition(DraftState::Rejected)?;
        Ok(())
    }

    /// Copy safe to show a buyer: reasoning removed.
    pub fn redacted(mut self) -> Self {
        self.reasoning = None;
        self
    }

    fn transition(&self, target: DraftState) -> Result<DraftState, NegotiationError> {
        if !self.is_ai_response {
            return Err(NegotiationError::invalid_operation(
                "only AI drafts can be reviewed",
            ));
        }
        self.state.transition_to(target).map_err(|_| {
            NegotiationError::invalid_operation(format!("draft is already {}", self.state))
        })
    }
}
