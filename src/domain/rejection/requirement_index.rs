//! Per-intent required-entity index built from a domain schema.

use serde_json::Value;
use std::collections::HashMap;

use super::entity_requirement::EntityRequirement;
use super::errors::GateError;
use crate::domain::nlu::DomainSchema;

const REQUIRE_ENTITIES_KEY: &str = "require_entities";

/// Maps intent name to its required entities.
///
/// An intent with no entry has no requirement at all, which is different
/// from an entry with an empty list (that intent must come without entities).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementIndex {
    requirements: HashMap<String, Vec<EntityRequirement>>,
}

impl RequirementIndex {
    /// Build the index from the intent declarations of a domain.
    ///
    /// Bare intent names are skipped. Mappings contribute an entry only when
    /// they declare `require_entities`; every declaration is normalized.
    ///
    /// # Errors
    ///
    /// `GateError::Configuration` when an intent entry or one of its entity
    /// declarations has an unsupported shape.
    pub fn build(schema: &DomainSchema) -> Result<Self, GateError> {
        let mut requirements = HashMap::new();

        for entry in &schema.intents {
            match entry {
                Value::String(_) => {}
                Value::Object(declarations) => {
                    for (intent_name, properties) in declarations {
                        if let Some(required) = declared_requirements(intent_name, properties)? {
                            requirements.insert(intent_name.clone(), required);
                        }
                    }
                }
                other => {
                    return Err(GateError::configuration(format!(
                        "intent entry must be a name or a mapping, got {other}"
                    )))
                }
            }
        }

        Ok(Self { requirements })
    }

    /// Required entities of an intent, `None` when it declares none
    pub fn requirements_for(&self, intent_name: &str) -> Option<&[EntityRequirement]> {
        self.requirements.get(intent_name).map(Vec::as_slice)
    }

    pub fn insert(&mut self, intent_name: impl Into<String>, required: Vec<EntityRequirement>) {
        self.requirements.insert(intent_name.into(), required);
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

fn declared_requirements(
    intent_name: &str,
    properties: &Value,
) -> Result<Option<Vec<EntityRequirement>>, GateError> {
    let declared = match properties {
        Value::Object(properties) => properties.get(REQUIRE_ENTITIES_KEY),
        _ => None,
    };

    match declared {
        None => Ok(None),
        Some(Value::Array(declarations)) => declarations
            .iter()
            .map(EntityRequirement::normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(GateError::configuration(format!(
            "require_entities of intent '{intent_name}' must be a list, got {other}"
        ))),
    }
}
