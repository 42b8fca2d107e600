//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Threshold {field} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("Custom threshold for intent '{intent}' must be within [0, 1], got {value}")]
    CustomThresholdOutOfRange { intent: String, value: f64 },

    #[error("Empty intent name in {0}")]
    EmptyIntentName(&'static str),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
