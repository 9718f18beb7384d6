//! Negotiation reasoner configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Gemini settings. Without an API key, drafting is disabled and chat
/// works without it.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if one is set and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key().is_some()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidReasonerTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    crate::adapters::ai::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    crate::adapters::ai::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash-001");
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(!config.has_gemini());
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new(" ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_gemini());
    }

    #[test]
    fn test_key_is_redacted_in_debug_output() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("super-secret".to_string())),
            ..Default::default()
        };
        assert!(config.has_gemini());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_validation_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidReasonerTimeout));
    }
}
