//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional `utterance_gate.*`
//! file in the working directory, then from environment variables with the
//! `UTTERANCE_GATE` prefix; nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use utterance_gate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Default threshold: {}", config.rejection.thresholds.default);
//! ```

mod domain;
mod error;
mod logging;
mod rejection;

pub use domain::DomainSourceConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use rejection::{
    RejectionConfig, Thresholds, DEFAULT_AMBIGUITY_THRESHOLD, DEFAULT_METHOD, DEFAULT_THRESHOLD,
    REJECTION_INTENT_NAME,
};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// gate with the documented default behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rejection gate settings
    #[serde(default)]
    pub rejection: RejectionConfig,

    /// Domain schema source
    #[serde(default)]
    pub domain: DomainSourceConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `utterance_gate.{yaml,toml,json}` if present
    /// 3. Reads environment variables with `UTTERANCE_GATE` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `UTTERANCE_GATE__REJECTION__ENABLED=false` -> `rejection.enabled = false`
    /// - `UTTERANCE_GATE__REJECTION__THRESHOLDS__DEFAULT=0.7` -> `rejection.thresholds.default = 0.7`
    /// - `UTTERANCE_GATE__REJECTION__EXCLUDED_INTENTS=nlu_fallback,chitchat` -> list
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("utterance_gate").required(false))
            .add_source(
                config::Environment::default()
                    .prefix("UTTERANCE_GATE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("rejection.excluded_intents"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.rejection.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
