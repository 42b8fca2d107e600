//! Required-entity descriptors and their normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::errors::GateError;
use crate::domain::nlu::{Entity, EntityLabel};

/// Canonical `{type, role, group}` shape of a required entity.
///
/// Predicted entities are projected onto the same shape before comparison,
/// so an entity only satisfies a requirement when all three parts agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRequirement {
    #[serde(rename = "entity")]
    pub entity_type: String,
    pub role: Option<String>,
    pub group: Option<String>,
}

impl EntityRequirement {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            role: None,
            group: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Normalize a declaration from the domain schema.
    ///
    /// Accepts a bare entity type name or a mapping with an `entity` (or
    /// `type`) key and optional `role` / `group` keys.
    ///
    /// # Errors
    ///
    /// `GateError::Configuration` for any other shape, e.g. a number or null.
    pub fn normalize(declaration: &Value) -> Result<Self, GateError> {
        match declaration {
            Value::String(name) => Ok(Self::new(non_empty(name)?)),
            Value::Object(fields) => Self::from_fields(fields),
            other => Err(GateError::configuration(format!(
                "required entity must be an entity name or a mapping, got {other}"
            ))),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, GateError> {
        let entity_type = match fields.get("entity").or_else(|| fields.get("type")) {
            Some(Value::String(name)) => non_empty(name)?.to_string(),
            Some(other) => {
                return Err(GateError::configuration(format!(
                    "required entity type must be a string, got {other}"
                )))
            }
            None => {
                return Err(GateError::configuration(
                    "required entity mapping has no `entity` key",
                ))
            }
        };

        Ok(Self {
            entity_type,
            role: optional_label(fields, "role")?,
            group: optional_label(fields, "group")?,
        })
    }

    /// Check whether a predicted entity has this exact type, role and group
    pub fn matches(&self, entity: &Entity) -> bool {
        self.entity_type == entity.entity_type
            && same_label(self.role.as_deref(), entity.role.as_ref())
            && same_label(self.group.as_deref(), entity.group.as_ref())
    }
}

impl From<&Entity> for EntityRequirement {
    fn from(entity: &Entity) -> Self {
        Self {
            entity_type: entity.entity_type.clone(),
            role: entity.role.as_ref().map(ToString::to_string),
            group: entity.group.as_ref().map(ToString::to_string),
        }
    }
}

impl fmt::Display for EntityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entity_type)?;
        if let Some(role) = &self.role {
            write!(f, "[role={}]", role)?;
        }
        if let Some(group) = &self.group {
            write!(f, "[group={}]", group)?;
        }
        Ok(())
    }
}

fn non_empty(name: &str) -> Result<&str, GateError> {
    if name.trim().is_empty() {
        Err(GateError::configuration("required entity type is empty"))
    } else {
        Ok(name)
    }
}

// YAML writes numeric groups without quotes, predicted entities carry strings.
fn same_label(required: Option<&str>, predicted: Option<&EntityLabel>) -> bool {
    match (required, predicted) {
        (None, None) => true,
        (Some(required), Some(EntityLabel::Text(predicted))) => required == predicted,
        (Some(required), Some(predicted)) => required == predicted.to_string(),
        _ => false,
    }
}

fn optional_label(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, GateError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(label)) => Ok(Some(label.clone())),
        Some(Value::Number(label)) => Ok(Some(label.to_string())),
        Some(other) => Err(GateError::configuration(format!(
            "required entity {key} must be a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_name_normalizes_to_type_only() {
        let requirement = EntityRequirement::normalize(&json!("date")).unwrap();
        assert_eq!(requirement, EntityRequirement::new("date"));
        assert!(requirement.role.is_none());
        assert!(requirement.group.is_none());
    }

    #[test]
    fn mapping_keeps_role_and_group() {
        let requirement = EntityRequirement::normalize(&json!({
            "entity": "city",
            "role": "destination",
            "group": "1"
        }))
        .unwrap();

        assert_eq!(
            requirement,
            EntityRequirement::new("city")
                .with_role("destination")
                .with_group("1")
        );
    }

    #[test]
    fn type_key_is_accepted() {
        let requirement = EntityRequirement::normalize(&json!({ "type": "date" })).unwrap();
        assert_eq!(requirement.entity_type, "date");
    }

    #[test]
    fn numeric_group_becomes_string() {
        let requirement =
            EntityRequirement::normalize(&json!({ "entity": "pizza", "group": 2 })).unwrap();
        assert_eq!(requirement.group.as_deref(), Some("2"));
    }

    #[test]
    fn numeric_group_matches_numeric_prediction() {
        let requirement =
            EntityRequirement::normalize(&json!({ "entity": "pizza", "group": 2 })).unwrap();

        let predicted: Entity =
            serde_json::from_value(json!({ "entity": "pizza", "group": 2, "value": "pepperoni" }))
                .unwrap();
        assert!(requirement.matches(&predicted));
        assert!(requirement.matches(&Entity::new("pizza").with_group("2")));
        assert!(!requirement.matches(&Entity::new("pizza").with_group(3u64)));
        assert_eq!(EntityRequirement::from(&predicted), requirement);
    }

    #[test]
    fn null_role_is_absent() {
        let requirement =
            EntityRequirement::normalize(&json!({ "entity": "date", "role": null })).unwrap();
        assert!(requirement.role.is_none());
    }

    #[test]
    fn other_shapes_are_configuration_errors() {
        for declaration in [json!(42), json!(null), json!(true), json!(["date"])] {
            let result = EntityRequirement::normalize(&declaration);
            assert!(
                matches!(result, Err(GateError::Configuration(_))),
                "{declaration} should be rejected"
            );
        }
    }

    #[test]
    fn mapping_without_type_is_rejected() {
        let result = EntityRequirement::normalize(&json!({ "role": "destination" }));
        assert!(matches!(result, Err(GateError::Configuration(_))));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(EntityRequirement::normalize(&json!("")).is_err());
    }

    #[test]
    fn non_string_role_is_rejected() {
        let result = EntityRequirement::normalize(&json!({ "entity": "city", "role": ["a"] }));
        assert!(matches!(result, Err(GateError::Configuration(_))));
    }

    #[test]
    fn matches_requires_all_parts() {
        let requirement = EntityRequirement::new("city").with_role("destination");

        assert!(requirement.matches(&Entity::new("city").with_role("destination")));
        assert!(!requirement.matches(&Entity::new("city")));
        assert!(!requirement.matches(&Entity::new("city").with_role("departure")));
        assert!(!requirement
            .matches(&Entity::new("city").with_role("destination").with_group("1")));
    }

    #[test]
    fn display_includes_qualifiers() {
        let requirement = EntityRequirement::new("city")
            .with_role("destination")
            .with_group("1");
        assert_eq!(requirement.to_string(), "city[role=destination][group=1]");
    }
}
