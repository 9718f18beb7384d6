//! Listing-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, ValidationError};

/// Errors raised by listing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// Listing does not exist.
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Caller is not the listing's seller.
    #[error("Permission denied: caller is not the seller")]
    Unauthorized,

    /// Status precondition no longer holds (e.g. already sold).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operation is never allowed in the current situation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ItemError {
    pub fn conflict(message: impl Into<String>) -> Self {
        ItemError::Conflict(message.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        ItemError::InvalidOperation(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ItemError::NotFound(_) => ErrorCode::ItemNotFound,
            ItemError::Unauthorized => ErrorCode::Forbidden,
            ItemError::Conflict(_) => ErrorCode::Conflict,
            ItemError::InvalidOperation(_) => ErrorCode::InvalidOperation,
            ItemError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ItemError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for ItemError {
    fn from(err: ValidationError) -> Self {
        ItemError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ItemError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => ItemError::Conflict(err.message),
            ErrorCode::Forbidden => ItemError::Unauthorized,
            ErrorCode::InvalidOperation => ItemError::InvalidOperation(err.message),
            ErrorCode::ValidationFailed => ItemError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            // A conditional write missed a row the handler had just read.
            ErrorCode::ItemNotFound => {
                match err.details.get("id").and_then(|id| id.parse::<ItemId>().ok()) {
                    Some(id) => ItemError::NotFound(id),
                    None => ItemError::Conflict(err.message),
                }
            }
            _ => ItemError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_domain_error_maps_to_conflict() {
        let err: ItemError = DomainError::conflict("version mismatch").into();
        assert_eq!(err, ItemError::Conflict("version mismatch".to_string()));
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err: ItemError = DomainError::database("insert item", "connection reset").into();
        assert!(matches!(err, ItemError::Infrastructure(_)));
    }

    #[test]
    fn storage_miss_maps_to_not_found() {
        let id = ItemId::new();
        let err: ItemError = DomainError::item_not_found(id).into();
        assert_eq!(err, ItemError::NotFound(id));
        assert_eq!(err.code(), ErrorCode::ItemNotFound);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: ItemError = ValidationError::empty_field("name").into();
        assert!(matches!(err, ItemError::ValidationFailed { ref field, .. } if field == "name"));
    }
}
