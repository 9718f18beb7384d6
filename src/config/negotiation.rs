//! Negotiation policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::negotiation::DEFAULT_FLOOR_PERCENT;

#[derive(Debug, Clone, Deserialize)]
pub struct NegotiationConfig {
    /// Floor as a share of the asking price when the seller set none
    #[serde(default = "default_floor_percent")]
    pub default_floor_percent: u8,

    /// Attempts for a listing write that loses a version race
    #[serde(default = "default_max_commit_retries")]
    pub max_commit_retries: u32,
}

impl NegotiationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_floor_percent == 0 || self.default_floor_percent > 100 {
            return Err(ValidationError::InvalidFloorPercent);
        }
        if self.max_commit_retries == 0 {
            return Err(ValidationError::InvalidCommitRetries);
        }
        Ok(())
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            default_floor_percent: default_floor_percent(),
            max_commit_retries: default_max_commit_retries(),
        }
    }
}

fn default_floor_percent() -> u8 {
    DEFAULT_FLOOR_PERCENT
}

fn default_max_commit_retries() -> u32 {
    5
}
