//! Threshold Evaluator - confidence and ambiguity checks.

use serde::{Deserialize, Serialize};

use crate::config::RejectionConfig;
use crate::domain::nlu::RankedIntent;

/// Confidence assumed for ranking entries that carry none.
pub const ASSUMED_CONFIDENCE: f64 = 1.0;

/// Outcome of the threshold checks for one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdCheck {
    /// Confident and unambiguous enough
    Passed,
    /// Below the intent's custom threshold
    BelowCustom { confidence: f64, threshold: f64 },
    /// Below the default threshold
    BelowDefault { confidence: f64, threshold: f64 },
    /// Top two ranked intents are closer than the ambiguity threshold
    Ambiguous { delta: f64, threshold: f64 },
}

impl ThresholdCheck {
    pub fn passed(&self) -> bool {
        matches!(self, ThresholdCheck::Passed)
    }
}

/// Evaluates confidence thresholds and ranking ambiguity.
pub struct ThresholdEvaluator;

impl ThresholdEvaluator {
    /// Runs the threshold checks in order.
    ///
    /// 1. An intent with a custom threshold is judged by that threshold
    ///    alone; the ambiguity check does not apply to it.
    /// 2. Otherwise the confidence must reach the default threshold, and
    /// 3. the top two non-excluded ranking entries must be at least the
    ///    ambiguity threshold apart.
    ///
    /// All comparisons are strict: a value equal to its threshold passes.
    pub fn check(
        intent_name: &str,
        confidence: f64,
        ranking: &[RankedIntent],
        config: &RejectionConfig,
    ) -> ThresholdCheck {
        let (threshold, is_custom) = config.threshold_for(intent_name);
        if confidence < threshold {
            return if is_custom {
                ThresholdCheck::BelowCustom {
                    confidence,
                    threshold,
                }
            } else {
                ThresholdCheck::BelowDefault {
                    confidence,
                    threshold,
                }
            };
        }
        if is_custom {
            return ThresholdCheck::Passed;
        }

        let threshold = config.thresholds.ambiguity;
        match Self::confidence_delta(ranking, &config.excluded_intents) {
            Some(delta) if delta < threshold => ThresholdCheck::Ambiguous { delta, threshold },
            _ => ThresholdCheck::Passed,
        }
    }

    /// Boolean form of [`ThresholdEvaluator::check`].
    pub fn is_above_threshold(
        intent_name: &str,
        confidence: f64,
        ranking: &[RankedIntent],
        config: &RejectionConfig,
    ) -> bool {
        Self::check(intent_name, confidence, ranking, config).passed()
    }

    /// Confidence gap between the first two ranking entries that are not
    /// excluded, or `None` when fewer than two remain.
    pub fn confidence_delta(ranking: &[RankedIntent], excluded: &[String]) -> Option<f64> {
        let mut candidates = ranking
            .iter()
            .filter(|ranked| !excluded.iter().any(|name| *name == ranked.name))
            .map(|ranked| ranked.confidence.unwrap_or(ASSUMED_CONFIDENCE));

        let first = candidates.next()?;
        let second = candidates.next()?;
        Some(first - second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(default: f64, ambiguity: f64) -> RejectionConfig {
        let mut config = RejectionConfig::default();
        config.thresholds.default = default;
        config.thresholds.ambiguity = ambiguity;
        config
    }

    fn ranking(entries: &[(&str, f64)]) -> Vec<RankedIntent> {
        entries
            .iter()
            .map(|(name, confidence)| RankedIntent::new(*name, *confidence))
            .collect()
    }

    #[test]
    fn below_default_threshold() {
        let check = ThresholdEvaluator::check(
            "greet",
            0.68,
            &ranking(&[("greet", 0.68), ("stop", 0.5)]),
            &config(0.7, 0.1),
        );
        assert_eq!(
            check,
            ThresholdCheck::BelowDefault {
                confidence: 0.68,
                threshold: 0.7
            }
        );
    }

    #[test]
    fn equal_to_threshold_passes() {
        assert!(ThresholdEvaluator::is_above_threshold(
            "greet",
            0.7,
            &[],
            &config(0.7, 0.1)
        ));
    }

    #[test]
    fn close_top_two_is_ambiguous() {
        let check = ThresholdEvaluator::check(
            "greet",
            1.0,
            &ranking(&[("greet", 1.0), ("stop", 0.99)]),
            &config(0.7, 0.1),
        );
        assert!(matches!(check, ThresholdCheck::Ambiguous { threshold, .. } if threshold == 0.1));
        assert!(!check.passed());
    }

    #[test]
    fn gap_equal_to_ambiguity_threshold_passes() {
        let check = ThresholdEvaluator::check(
            "greet",
            0.75,
            &ranking(&[("greet", 0.75), ("stop", 0.5)]),
            &config(0.7, 0.25),
        );
        assert_eq!(check, ThresholdCheck::Passed);
    }

    #[test]
    fn excluded_intents_are_skipped_for_ambiguity() {
        // nlu_fallback sits between the two real candidates but is excluded
        let check = ThresholdEvaluator::check(
            "greet",
            0.9,
            &ranking(&[("greet", 0.9), ("nlu_fallback", 0.88), ("stop", 0.3)]),
            &config(0.7, 0.1),
        );
        assert_eq!(check, ThresholdCheck::Passed);
    }

    #[test]
    fn fewer_than_two_candidates_never_ambiguous() {
        let single = ranking(&[("greet", 0.9)]);
        assert!(ThresholdEvaluator::is_above_threshold("greet", 0.9, &single, &config(0.7, 0.5)));

        let only_excluded_left = ranking(&[("greet", 0.9), ("nlu_fallback", 0.89)]);
        assert!(ThresholdEvaluator::is_above_threshold(
            "greet",
            0.9,
            &only_excluded_left,
            &config(0.7, 0.5)
        ));

        assert!(ThresholdEvaluator::is_above_threshold("greet", 0.9, &[], &config(0.7, 0.5)));
    }

    #[test]
    fn missing_ranking_confidence_assumed_certain() {
        let entries = vec![
            RankedIntent {
                name: "greet".to_string(),
                confidence: None,
                extra: Default::default(),
            },
            RankedIntent::new("stop", 0.5),
        ];
        assert_eq!(
            ThresholdEvaluator::confidence_delta(&entries, &[]),
            Some(0.5)
        );

        let both_missing = vec![
            RankedIntent {
                name: "greet".to_string(),
                confidence: None,
                extra: Default::default(),
            },
            RankedIntent {
                name: "stop".to_string(),
                confidence: None,
                extra: Default::default(),
            },
        ];
        assert_eq!(
            ThresholdEvaluator::confidence_delta(&both_missing, &[]),
            Some(0.0)
        );
    }

    #[test]
    fn custom_threshold_replaces_default() {
        let mut config = config(0.7, 0.1);
        config.thresholds.custom.insert("greet".to_string(), 0.8);

        let check = ThresholdEvaluator::check(
            "greet",
            0.75,
            &ranking(&[("greet", 0.75)]),
            &config,
        );
        assert_eq!(
            check,
            ThresholdCheck::BelowCustom {
                confidence: 0.75,
                threshold: 0.8
            }
        );

        // Below default but above its own lower custom threshold
        config.thresholds.custom.insert("stop".to_string(), 0.4);
        assert!(ThresholdEvaluator::is_above_threshold(
            "stop",
            0.5,
            &ranking(&[("stop", 0.5)]),
            &config
        ));
    }

    #[test]
    fn custom_threshold_bypasses_ambiguity() {
        let mut config = config(0.7, 0.1);
        config.thresholds.custom.insert("greet".to_string(), 0.8);

        let check = ThresholdEvaluator::check(
            "greet",
            0.9,
            &ranking(&[("greet", 0.9), ("stop", 0.89)]),
            &config,
        );
        assert_eq!(check, ThresholdCheck::Passed);
    }
}
