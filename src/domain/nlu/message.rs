//! Message envelope passed between NLU pipeline stages.
//!
//! Fields the gate does not interpret (entity values, character offsets,
//! extractor names, extra top-level keys) are kept in `extra` maps so a
//! message that is accepted serializes back exactly as it arrived.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::domain::rejection::GateError;

/// Predicted intent of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Declarations carried along by upstream stages; the gate takes
    /// requirements from the domain schema, not from here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_entities: Option<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Intent {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence: Some(confidence),
            require_entities: None,
            extra: Map::new(),
        }
    }
}

/// One entry of the intent ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedIntent {
    pub name: String,

    /// Absent confidences are read as 1.0 by the ambiguity check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RankedIntent {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence: Some(confidence),
            extra: Map::new(),
        }
    }
}

/// Ranking entry for an intent; only name and confidence are carried over.
impl From<&Intent> for RankedIntent {
    fn from(intent: &Intent) -> Self {
        Self {
            name: intent.name.clone(),
            confidence: intent.confidence,
            extra: Map::new(),
        }
    }
}

/// Role or group of an extracted entity.
///
/// Extractors emit either strings or numbers; the original form is kept
/// for serialization and both compare through their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityLabel {
    Text(String),
    Number(Number),
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Text(label) => f.write_str(label),
            EntityLabel::Number(label) => write!(f, "{}", label),
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(label: &str) -> Self {
        EntityLabel::Text(label.to_string())
    }
}

impl From<String> for EntityLabel {
    fn from(label: String) -> Self {
        EntityLabel::Text(label)
    }
}

impl From<u64> for EntityLabel {
    fn from(label: u64) -> Self {
        EntityLabel::Number(label.into())
    }
}

/// An extracted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "entity", alias = "type")]
    pub entity_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<EntityLabel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<EntityLabel>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            role: None,
            group: None,
            extra: Map::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<EntityLabel>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<EntityLabel>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A user utterance annotated by the upstream classifier and extractors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_ranking: Option<Vec<RankedIntent>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,

    /// Caller's request to treat the utterance as complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Create a message carrying only text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the predicted intent
    pub fn with_intent(mut self, name: impl Into<String>, confidence: f64) -> Self {
        self.intent = Some(Intent::new(name, confidence));
        self
    }

    /// Append an entry to the intent ranking
    pub fn with_ranked(mut self, name: impl Into<String>, confidence: f64) -> Self {
        self.intent_ranking
            .get_or_insert_with(Vec::new)
            .push(RankedIntent::new(name, confidence));
        self
    }

    /// Append an extracted entity
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.get_or_insert_with(Vec::new).push(entity);
        self
    }

    /// Mark the message as final
    pub fn finalized(mut self) -> Self {
        self.is_final = Some(true);
        self
    }

    /// Whether the caller asked for the utterance to be final
    pub fn is_final(&self) -> bool {
        self.is_final.unwrap_or(false)
    }

    /// The predicted intent.
    ///
    /// # Errors
    ///
    /// `GateError::MissingField` when the upstream stage set no intent.
    pub fn intent(&self) -> Result<&Intent, GateError> {
        self.intent
            .as_ref()
            .ok_or(GateError::MissingField { field: "intent" })
    }

    /// Name of the predicted intent.
    pub fn intent_name(&self) -> Result<&str, GateError> {
        self.intent().map(|i| i.name.as_str())
    }

    /// Confidence of the predicted intent.
    ///
    /// # Errors
    ///
    /// `GateError::MissingField` when either the intent or its confidence is absent.
    pub fn intent_confidence(&self) -> Result<f64, GateError> {
        self.intent()?.confidence.ok_or(GateError::MissingField {
            field: "intent.confidence",
        })
    }

    /// Intent ranking, empty when none was provided
    pub fn ranking(&self) -> &[RankedIntent] {
        self.intent_ranking.as_deref().unwrap_or(&[])
    }

    /// Extracted entities, empty when none were provided
    pub fn entities(&self) -> &[Entity] {
        self.entities.as_deref().unwrap_or(&[])
    }
}
