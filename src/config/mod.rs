//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `NEGO_MARKET` prefix and
//! nested values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use nego_market::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod negotiation;
mod server;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use negotiation::NegotiationConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

use crate::application::DraftSettings;
use crate::domain::negotiation::PricingPolicy;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development setup (in-memory storage, drafting disabled).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Negotiation reasoner configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Negotiation policy
    #[serde(default)]
    pub negotiation: NegotiationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NEGO_MARKET` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `NEGO_MARKET__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEGO_MARKET__DATABASE__URL=...` -> `database.url = ...`
    /// - `NEGO_MARKET__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `NEGO_MARKET__SERVER__CORS_ORIGINS=a,b` -> `server.cors_origins = [a, b]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEGO_MARKET")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any value is invalid, or if production
    /// is configured without a database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.negotiation.validate()?;

        if self.is_production() && self.database.url().is_none() {
            return Err(ValidationError::MissingRequired("NEGO_MARKET__DATABASE__URL"));
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Settings for the draft-producing handlers.
    pub fn draft_settings(&self) -> DraftSettings {
        DraftSettings {
            pricing: PricingPolicy::new(self.negotiation.default_floor_percent),
            reasoner_timeout: self.ai.timeout(),
        }
    }
}
