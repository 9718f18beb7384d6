//! ItemStatus enum for tracking the lifecycle of a listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    OnSale,
    Sold,
    Deleted,
}

impl ItemStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::OnSale => "on_sale",
            ItemStatus::Sold => "sold",
            ItemStatus::Deleted => "deleted",
        }
    }

    /// Returns true while the listing accepts purchases and edits.
    pub fn is_on_sale(&self) -> bool {
        matches!(self, ItemStatus::OnSale)
    }
}

impl StateMachine for ItemStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ItemStatus::*;
        matches!((self, target), (OnSale, Sold) | (OnSale, Deleted))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ItemStatus::OnSale => vec![ItemStatus::Sold, ItemStatus::Deleted],
            ItemStatus::Sold | ItemStatus::Deleted => vec![],
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_sale" => Ok(ItemStatus::OnSale),
            "sold" => Ok(ItemStatus::Sold),
            "deleted" => Ok(ItemStatus::Deleted),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown item status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_on_sale() {
        assert_eq!(ItemStatus::default(), ItemStatus::OnSale);
    }

    #[test]
    fn on_sale_can_be_sold_or_deleted() {
        assert!(ItemStatus::OnSale.can_transition_to(&ItemStatus::Sold));
        assert!(ItemStatus::OnSale.can_transition_to(&ItemStatus::Deleted));
    }

    #[test]
    fn sold_and_deleted_are_terminal() {
        assert!(ItemStatus::Sold.is_terminal());
        assert!(ItemStatus::Deleted.is_terminal());
        assert!(ItemStatus::Sold.transition_to(ItemStatus::OnSale).is_err());
    }

    #[test]
    fn parses_storage_form() {
        for status in [ItemStatus::OnSale, ItemStatus::Sold, ItemStatus::Deleted] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::OnSale).unwrap(),
            "\"on_sale\""
        );
    }
}
