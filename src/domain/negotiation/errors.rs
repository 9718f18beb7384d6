//! Negotiation-specific error types.

use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, MessageId, ValidationError};
use crate::domain::item::ItemError;

/// Errors raised by the chat and draft lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    /// Regeneration was requested but no buyer has spoken yet.
    #[error("no buyer message found to respond to")]
    NoBuyerMessage(ItemId),

    #[error("Permission denied: caller is not the seller")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The reasoner was unreachable or answered with something unusable.
    #[error("Negotiation reasoner failed: {0}")]
    UpstreamFailure(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl NegotiationError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        NegotiationError::InvalidOperation(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        NegotiationError::UpstreamFailure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            NegotiationError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            NegotiationError::MessageNotFound(_) | NegotiationError::NoBuyerMessage(_) => {
                ErrorCode::MessageNotFound
            }
            NegotiationError::Unauthorized => ErrorCode::Forbidden,
            NegotiationError::Conflict(_) => ErrorCode::Conflict,
            NegotiationError::InvalidOperation(_) => ErrorCode::InvalidOperation,
            NegotiationError::UpstreamFailure(_) => ErrorCode::UpstreamFailure,
            NegotiationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            NegotiationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ItemError> for NegotiationError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => NegotiationError::ItemNotFound(id),
            ItemError::Unauthorized => NegotiationError::Unauthorized,
            ItemError::Conflict(msg) => NegotiationError::Conflict(msg),
            ItemError::InvalidOperation(msg) => NegotiationError::InvalidOperation(msg),
            ItemError::ValidationFailed { field, message } => {
                NegotiationError::ValidationFailed { field, message }
            }
            ItemError::Infrastructure(msg) => NegotiationError::Infrastructure(msg),
        }
    }
}

impl From<ValidationError> for NegotiationError {
    fn from(err: ValidationError) -> Self {
        NegotiationError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for NegotiationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => NegotiationError::Conflict(err.message),
            ErrorCode::Forbidden => NegotiationError::Unauthorized,
            ErrorCode::InvalidOperation => NegotiationError::InvalidOperation(err.message),
            ErrorCode::UpstreamFailure => NegotiationError::UpstreamFailure(err.message),
            // A conditional write missed a row the handler had just read.
            ErrorCode::ItemNotFound => match detail_id::<ItemId>(&err) {
                Some(id) => NegotiationError::ItemNotFound(id),
                None => NegotiationError::Conflict(err.message),
            },
            ErrorCode::MessageNotFound => match detail_id::<MessageId>(&err) {
                Some(id) => NegotiationError::MessageNotFound(id),
                None => NegotiationError::Conflict(err.message),
            },
            _ => NegotiationError::Infrastructure(err.to_string()),
        }
    }
}

fn detail_id<T: FromStr>(err: &DomainError) -> Option<T> {
    err.details.get("id").and_then(|id| id.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_buyer_message_has_stable_text() {
        let err = NegotiationError::NoBuyerMessage(ItemId::new());
        assert_eq!(err.to_string(), "no buyer message found to respond to");
        assert_eq!(err.code(), ErrorCode::MessageNotFound);
    }

    #[test]
    fn item_errors_keep_their_category() {
        let id = ItemId::new();
        assert_eq!(
            NegotiationError::from(ItemError::NotFound(id)),
            NegotiationError::ItemNotFound(id)
        );
        assert_eq!(
            NegotiationError::from(ItemError::conflict("sold")),
            NegotiationError::Conflict("sold".to_string())
        );
    }

    #[test]
    fn storage_misses_keep_their_not_found_category() {
        let id = MessageId::new();
        let err: NegotiationError = DomainError::message_not_found(id).into();
        assert_eq!(err, NegotiationError::MessageNotFound(id));

        let item = ItemId::new();
        let err: NegotiationError = DomainError::item_not_found(item).into();
        assert_eq!(err, NegotiationError::ItemNotFound(item));
    }

    #[test]
    fn storage_miss_without_id_is_a_conflict() {
        let err: NegotiationError =
            DomainError::new(ErrorCode::MessageNotFound, "gone").into();
        assert_eq!(err, NegotiationError::Conflict("gone".to_string()));
    }

    #[test]
    fn storage_conflict_maps_to_conflict() {
        let err: NegotiationError = DomainError::conflict("draft already pending").into();
        assert!(matches!(err, NegotiationError::Conflict(_)));
    }
}
