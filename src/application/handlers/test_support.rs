//! Fixtures shared by handler tests.

use crate::domain::foundation::{Price, UserId};
use crate::domain::item::{Item, NewListing};
use crate::domain::negotiation::{AiDecision, BuyerIntent, Message, NegotiationDecision, NegotiationLog};

pub fn seller() -> UserId {
    UserId::new("seller-1").unwrap()
}

pub fn buyer() -> UserId {
    UserId::new("buyer-1").unwrap()
}

pub fn other_buyer() -> UserId {
    UserId::new("buyer-2").unwrap()
}

pub fn listed_item(price: i64, min_price: Option<i64>) -> Item {
    Item::list(NewListing {
        seller_id: seller(),
        name: "Film camera".to_string(),
        description: "Lens included, minor scratches".to_string(),
        price: Price::new(price).unwrap(),
        min_price: min_price.map(|p| Price::new(p).unwrap()),
        ai_negotiation_enabled: true,
        image_url: None,
    })
    .unwrap()
}

/// The log entry a reasoner would have written alongside `draft`, answering
/// `buyer()`.
pub fn log_for(draft: &Message) -> NegotiationLog {
    let decision = NegotiationDecision {
        intent: BuyerIntent::Negotiation,
        decision: if draft.suggested_price.is_some() {
            AiDecision::Counter
        } else {
            AiDecision::Answer
        },
        detected_price: Price::zero(),
        counter_price: draft.suggested_price.unwrap_or_default(),
        reasoning: draft.reasoning.clone().unwrap_or_default(),
        response_text: draft.content.clone(),
    };
    NegotiationLog::record(draft.item_id, buyer(), draft.id, &decision, false)
}
