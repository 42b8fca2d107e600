//! Entity Satisfaction Checker - compares predicted entities with the
//! entities an intent requires.

use serde::{Deserialize, Serialize};

use super::entity_requirement::EntityRequirement;
use super::requirement_index::RequirementIndex;
use crate::domain::nlu::Entity;

/// Outcome of the required-entity comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCheck {
    /// The intent declares no requirement
    Unconstrained,
    /// Predicted and required entities match
    Satisfied,
    /// Some required entities are missing or unexpected ones were predicted
    Unsatisfied {
        missing: Vec<EntityRequirement>,
        extra: Vec<EntityRequirement>,
    },
}

impl EntityCheck {
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, EntityCheck::Unsatisfied { .. })
    }
}

/// Checks predicted entities against the requirement index.
pub struct EntitySatisfactionChecker;

impl EntitySatisfactionChecker {
    /// Compares `{type, role, group}` projections of both sides.
    ///
    /// Every predicted entity must appear among the requirements and every
    /// requirement among the predictions. Membership is tested per element,
    /// so repeated mentions of a required entity do not count as extra.
    pub fn check(
        intent_name: &str,
        predicted: &[Entity],
        index: &RequirementIndex,
    ) -> EntityCheck {
        let Some(required) = index.requirements_for(intent_name) else {
            return EntityCheck::Unconstrained;
        };

        let extra: Vec<EntityRequirement> = predicted
            .iter()
            .filter(|entity| !required.iter().any(|r| r.matches(entity)))
            .map(EntityRequirement::from)
            .collect();

        let missing: Vec<EntityRequirement> = required
            .iter()
            .filter(|r| !predicted.iter().any(|entity| r.matches(entity)))
            .cloned()
            .collect();

        if extra.is_empty() && missing.is_empty() {
            EntityCheck::Satisfied
        } else {
            EntityCheck::Unsatisfied { missing, extra }
        }
    }

    /// Boolean form of [`EntitySatisfactionChecker::check`].
    pub fn satisfies_requirements(
        intent_name: &str,
        predicted: &[Entity],
        index: &RequirementIndex,
    ) -> bool {
        Self::check(intent_name, predicted, index).is_satisfied()
    }
}
