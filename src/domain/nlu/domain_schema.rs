//! Conversation domain schema as seen by the rejection gate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Intent declarations of a conversation domain.
///
/// Each entry is either a bare intent name or a single-key mapping such as
/// `{ book_flight: { require_entities: [date, { entity: city, role: to }] } }`.
/// All other domain sections (responses, slots, forms) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSchema {
    #[serde(default)]
    pub intents: Vec<Value>,
}

impl DomainSchema {
    pub fn from_intents(intents: Vec<Value>) -> Self {
        Self { intents }
    }

    /// Parse a domain YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
