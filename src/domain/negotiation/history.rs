//! Conversation history reconstruction for reasoner context.
//!
//! Exclusion is by message id, supplied by the caller. Timestamps can tie
//! when several writes land in the same clock tick, so ordering falls back
//! to the time-sortable id.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{MessageId, UserId};

use super::Message;

/// Who said a line of history, from the listing's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    Seller,
    Buyer,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Seller => write!(f, "Seller"),
            Party::Buyer => write!(f, "Buyer"),
        }
    }
}

/// One line of conversation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Party,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: Party, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Oldest-first history with seller/buyer labels, minus `exclude`.
pub fn reconstruct_history(
    messages: &[Message],
    seller_id: &UserId,
    exclude: &HashSet<MessageId>,
) -> Vec<HistoryEntry> {
    let mut kept: Vec<&Message> = messages
        .iter()
        .filter(|m| !exclude.contains(&m.id))
        .collect();
    kept.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    kept.into_iter()
        .map(|m| {
            let role = if &m.sender_id == seller_id {
                Party::Seller
            } else {
                Party::Buyer
            };
            HistoryEntry::new(role, m.content.clone())
        })
        .collect()
}
