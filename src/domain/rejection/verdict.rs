//! Gate verdicts and the reasons behind them.

use serde::{Deserialize, Serialize};

use super::entity_checker::EntityCheck;
use super::entity_requirement::EntityRequirement;
use super::threshold_evaluator::ThresholdCheck;

/// Why a message was accepted as a full utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptReason {
    /// The gate is switched off
    Disabled,
    /// The message asked to be final and forcing is allowed
    ForcedFinal,
    /// Every check passed
    FullUtterance,
}

/// Why a message was rewritten to the rejection intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectReason {
    ExcludedIntent {
        intent: String,
    },
    BelowCustomThreshold {
        confidence: f64,
        threshold: f64,
    },
    BelowDefaultThreshold {
        confidence: f64,
        threshold: f64,
    },
    Ambiguous {
        delta: f64,
        threshold: f64,
    },
    EntityMismatch {
        missing: Vec<EntityRequirement>,
        extra: Vec<EntityRequirement>,
    },
}

impl RejectReason {
    /// Reason for a failed threshold check, `None` if it passed.
    pub fn from_threshold(check: ThresholdCheck) -> Option<Self> {
        match check {
            ThresholdCheck::Passed => None,
            ThresholdCheck::BelowCustom {
                confidence,
                threshold,
            } => Some(RejectReason::BelowCustomThreshold {
                confidence,
                threshold,
            }),
            ThresholdCheck::BelowDefault {
                confidence,
                threshold,
            } => Some(RejectReason::BelowDefaultThreshold {
                confidence,
                threshold,
            }),
            ThresholdCheck::Ambiguous { delta, threshold } => {
                Some(RejectReason::Ambiguous { delta, threshold })
            }
        }
    }

    /// Reason for a failed entity check, `None` if it was satisfied.
    pub fn from_entities(check: EntityCheck) -> Option<Self> {
        match check {
            EntityCheck::Unsatisfied { missing, extra } => {
                Some(RejectReason::EntityMismatch { missing, extra })
            }
            EntityCheck::Unconstrained | EntityCheck::Satisfied => None,
        }
    }
}

/// Decision for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Accept(AcceptReason),
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Verdict::Reject(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_threshold_has_no_reason() {
        assert_eq!(RejectReason::from_threshold(ThresholdCheck::Passed), None);
    }

    #[test]
    fn threshold_failures_map_to_reasons() {
        assert_eq!(
            RejectReason::from_threshold(ThresholdCheck::Ambiguous {
                delta: 0.01,
                threshold: 0.1
            }),
            Some(RejectReason::Ambiguous {
                delta: 0.01,
                threshold: 0.1
            })
        );
        assert!(matches!(
            RejectReason::from_threshold(ThresholdCheck::BelowCustom {
                confidence: 0.75,
                threshold: 0.8
            }),
            Some(RejectReason::BelowCustomThreshold { .. })
        ));
    }

    #[test]
    fn satisfied_entities_have_no_reason() {
        assert_eq!(RejectReason::from_entities(EntityCheck::Satisfied), None);
        assert_eq!(RejectReason::from_entities(EntityCheck::Unconstrained), None);
    }

    #[test]
    fn verdict_predicates() {
        assert!(Verdict::Accept(AcceptReason::Disabled).is_accept());
        assert!(Verdict::Reject(RejectReason::ExcludedIntent {
            intent: "nlu_fallback".to_string()
        })
        .is_reject());
    }
}
