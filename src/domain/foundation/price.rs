//! Price value object (whole yen, no fractional currency).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Non-negative amount in the marketplace's single currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    /// Creates a price, rejecting negative amounts.
    pub fn new(amount: i64) -> Result<Self, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::invalid_format(
                "price",
                format!("must not be negative, got {}", amount),
            ));
        }
        Ok(Self(amount))
    }

    /// Zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw amount.
    pub fn amount(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `percent`% of this price, truncated toward zero. Saturates at
    /// `i64::MAX` when `percent` exceeds 100.
    pub fn percent(&self, percent: u8) -> Price {
        let scaled = i128::from(self.0) * i128::from(percent) / 100;
        Price(i64::try_from(scaled).unwrap_or(i64::MAX))
    }
}

impl TryFrom<i64> for Price {
    type Error = ValidationError;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        Price::new(amount)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}
