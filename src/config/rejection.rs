//! Utterance rejection configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::ValidationError;
use crate::domain::rejection::GateError;

/// Name of the synthetic intent written onto rejected messages.
pub const REJECTION_INTENT_NAME: &str = "nlu_fallback";

/// Default minimum confidence for the top intent.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default minimum gap between the top two ranked intents.
pub const DEFAULT_AMBIGUITY_THRESHOLD: f64 = 0.1;

/// Default rejection handling tag forwarded to downstream consumers.
pub const DEFAULT_METHOD: &str = "Ignore";

/// Configuration of the rejection gate.
///
/// Every field carries a serde default, so a partial document only overrides
/// the keys it names (nested `thresholds` keys included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionConfig {
    /// Master switch; when off every message is a full utterance
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Confidence and ambiguity thresholds
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Whether required-entity checking participates in the decision
    #[serde(default = "default_true")]
    pub require_entities_enabled: bool,

    /// Rejection handling tag, forwarded as metadata only
    #[serde(default = "default_method")]
    pub method: String,

    /// Whether `is_final` on a message forces acceptance
    #[serde(default = "default_true")]
    pub force_final_enabled: bool,

    /// Intents that are never full utterances
    #[serde(default = "default_excluded_intents")]
    pub excluded_intents: Vec<String>,
}

/// Threshold settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum acceptable confidence for the top intent
    #[serde(default = "default_threshold")]
    pub default: f64,

    /// Minimum confidence gap between the top two non-excluded ranked intents
    #[serde(
        rename = "ambiguity_threshold",
        alias = "ambiguity",
        default = "default_ambiguity"
    )]
    pub ambiguity: f64,

    /// Per-intent replacement for `default`
    #[serde(default)]
    pub custom: HashMap<String, f64>,

    /// Reserved; accepted but never evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unexpected_upon_requested_slot: Option<f64>,
}

impl RejectionConfig {
    /// Merge explicit options over the documented defaults.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Configuration` when the options do not have the
    /// expected shape (e.g. a threshold given as a string).
    pub fn from_value(options: serde_json::Value) -> Result<Self, GateError> {
        serde_json::from_value(options).map_err(|e| GateError::Configuration(e.to_string()))
    }

    /// Threshold that applies to `intent_name`, and whether it is a custom one.
    pub fn threshold_for(&self, intent_name: &str) -> (f64, bool) {
        match self.thresholds.custom.get(intent_name) {
            Some(threshold) => (*threshold, true),
            None => (self.thresholds.default, false),
        }
    }

    /// Check whether an intent is on the exclusion list
    pub fn is_excluded(&self, intent_name: &str) -> bool {
        self.excluded_intents.iter().any(|i| i == intent_name)
    }

    /// Configured features that are accepted but not evaluated.
    pub fn unimplemented_features(&self) -> Vec<GateError> {
        let mut features = Vec::new();
        if self.thresholds.unexpected_upon_requested_slot.is_some() {
            features.push(GateError::UnimplementedFeature {
                feature: "thresholds.unexpected_upon_requested_slot",
            });
        }
        features
    }

    /// Validate rejection configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_threshold("thresholds.default", self.thresholds.default)?;
        check_threshold("thresholds.ambiguity_threshold", self.thresholds.ambiguity)?;
        if let Some(value) = self.thresholds.unexpected_upon_requested_slot {
            check_threshold("thresholds.unexpected_upon_requested_slot", value)?;
        }

        for (intent, value) in &self.thresholds.custom {
            if intent.trim().is_empty() {
                return Err(ValidationError::EmptyIntentName("thresholds.custom"));
            }
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                return Err(ValidationError::CustomThresholdOutOfRange {
                    intent: intent.clone(),
                    value: *value,
                });
            }
        }

        if self.excluded_intents.iter().any(|i| i.trim().is_empty()) {
            return Err(ValidationError::EmptyIntentName("excluded_intents"));
        }

        if self.method.trim().is_empty() {
            return Err(ValidationError::MissingRequired("method"));
        }

        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ThresholdOutOfRange { field, value })
    }
}

impl Default for RejectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thresholds: Thresholds::default(),
            require_entities_enabled: true,
            method: default_method(),
            force_final_enabled: true,
            excluded_intents: default_excluded_intents(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            default: default_threshold(),
            ambiguity: default_ambiguity(),
            custom: HashMap::new(),
            unexpected_upon_requested_slot: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_ambiguity() -> f64 {
    DEFAULT_AMBIGUITY_THRESHOLD
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_excluded_intents() -> Vec<String> {
    vec![REJECTION_INTENT_NAME.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejection_config_defaults() {
        let config = RejectionConfig::default();
        assert!(config.enabled);
        assert_eq!(config.thresholds.default, DEFAULT_THRESHOLD);
        assert_eq!(config.thresholds.ambiguity, 0.1);
        assert!(config.thresholds.custom.is_empty());
        assert!(config.thresholds.unexpected_upon_requested_slot.is_none());
        assert!(config.require_entities_enabled);
        assert_eq!(config.method, "Ignore");
        assert!(config.force_final_enabled);
        assert_eq!(config.excluded_intents, vec!["nlu_fallback".to_string()]);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = RejectionConfig::from_value(json!({})).unwrap();
        assert_eq!(config, RejectionConfig::default());
    }

    #[test]
    fn test_partial_thresholds_keep_other_defaults() {
        let config = RejectionConfig::from_value(json!({
            "thresholds": { "default": 0.7 }
        }))
        .unwrap();

        assert_eq!(config.thresholds.default, 0.7);
        assert_eq!(config.thresholds.ambiguity, DEFAULT_AMBIGUITY_THRESHOLD);
        assert!(config.enabled);
    }

    #[test]
    fn test_ambiguity_key_and_alias() {
        let named = RejectionConfig::from_value(json!({
            "thresholds": { "ambiguity_threshold": 0.25 }
        }))
        .unwrap();
        let aliased = RejectionConfig::from_value(json!({
            "thresholds": { "ambiguity": 0.25 }
        }))
        .unwrap();

        assert_eq!(named.thresholds.ambiguity, 0.25);
        assert_eq!(aliased.thresholds.ambiguity, 0.25);
    }

    #[test]
    fn test_malformed_options_are_configuration_errors() {
        let result = RejectionConfig::from_value(json!({
            "thresholds": { "default": "high" }
        }));
        assert!(matches!(result, Err(GateError::Configuration(_))));
    }

    #[test]
    fn test_threshold_for_prefers_custom() {
        let mut config = RejectionConfig::default();
        config.thresholds.custom.insert("greet".to_string(), 0.8);

        assert_eq!(config.threshold_for("greet"), (0.8, true));
        assert_eq!(config.threshold_for("stop"), (DEFAULT_THRESHOLD, false));
    }

    #[test]
    fn test_is_excluded() {
        let config = RejectionConfig::default();
        assert!(config.is_excluded("nlu_fallback"));
        assert!(!config.is_excluded("greet"));
    }

    #[test]
    fn test_unimplemented_features_reported() {
        let mut config = RejectionConfig::default();
        assert!(config.unimplemented_features().is_empty());

        config.thresholds.unexpected_upon_requested_slot = Some(0.5);
        let features = config.unimplemented_features();
        assert_eq!(features.len(), 1);
        assert!(features[0]
            .to_string()
            .contains("unexpected_upon_requested_slot"));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(RejectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_threshold_out_of_range() {
        let mut config = RejectionConfig::default();
        config.thresholds.default = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ThresholdOutOfRange { field: "thresholds.default", .. })
        ));

        let mut config = RejectionConfig::default();
        config.thresholds.ambiguity = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_custom_threshold_out_of_range() {
        let mut config = RejectionConfig::default();
        config.thresholds.custom.insert("greet".to_string(), -0.1);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::CustomThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validation_empty_excluded_intent() {
        let config = RejectionConfig {
            excluded_intents: vec!["nlu_fallback".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyIntentName("excluded_intents"))
        ));
    }

    #[test]
    fn test_validation_empty_method() {
        let config = RejectionConfig {
            method: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
