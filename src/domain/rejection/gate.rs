//! Rejection Decision Engine
//!
//! Decides per message whether the prediction is a full utterance or must be
//! replaced by the rejection intent. Checks run in a fixed order and the
//! first definitive one wins:
//!
//! 1. gate disabled -> accept
//! 2. `is_final` with forcing enabled -> accept
//! 3. excluded intent -> reject
//! 4. threshold or ambiguity check fails -> reject
//! 5. required entities enabled and not satisfied -> reject
//! 6. otherwise accept
//!
//! Deciding ([`RejectionGate::evaluate`]) has no side effects; rewriting
//! ([`RejectionGate::apply_rejection`]) is a separate step.

use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, info, warn};

use super::entity_checker::EntitySatisfactionChecker;
use super::errors::GateError;
use super::requirement_index::RequirementIndex;
use super::threshold_evaluator::ThresholdEvaluator;
use super::verdict::{AcceptReason, RejectReason, Verdict};
use crate::config::{RejectionConfig, REJECTION_INTENT_NAME};
use crate::domain::nlu::{DomainSchema, Intent, Message, RankedIntent};

static EMPTY_INDEX: Lazy<RequirementIndex> = Lazy::new(RequirementIndex::default);

/// Stateless decision gate over classified messages.
///
/// The requirement index is the only mutable state. It is installed at most
/// once: either up front through [`RejectionGateBuilder::with_domain`] or on
/// the first `process` call that supplies a domain yielding requirements.
/// After that, other domains are ignored.
#[derive(Debug)]
pub struct RejectionGate {
    config: RejectionConfig,
    index: OnceCell<RequirementIndex>,
}

/// Builder for [`RejectionGate`].
#[derive(Debug)]
pub struct RejectionGateBuilder {
    config: RejectionConfig,
    domain: Option<DomainSchema>,
    index: Option<RequirementIndex>,
}

impl RejectionGateBuilder {
    /// Build the requirement index from this domain at construction time
    pub fn with_domain(mut self, domain: &DomainSchema) -> Self {
        self.domain = Some(domain.clone());
        self
    }

    /// Use an already built requirement index
    pub fn with_index(mut self, index: RequirementIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Validate configuration and build the gate.
    ///
    /// # Errors
    ///
    /// `GateError::Configuration` when the configuration fails validation or
    /// the domain contains malformed entity requirements.
    pub fn build(self) -> Result<RejectionGate, GateError> {
        self.config
            .validate()
            .map_err(|e| GateError::configuration(e.to_string()))?;

        for feature in self.config.unimplemented_features() {
            warn!(%feature, "Ignoring configured rejection feature");
        }

        let gate = RejectionGate {
            config: self.config,
            index: OnceCell::new(),
        };

        match (self.index, self.domain) {
            (Some(index), _) => gate.install_index(index),
            (None, Some(domain)) => gate.ensure_index(Some(&domain))?,
            (None, None) => {}
        }

        Ok(gate)
    }
}

impl RejectionGate {
    /// Start building a gate from merged configuration
    pub fn builder(config: RejectionConfig) -> RejectionGateBuilder {
        RejectionGateBuilder {
            config,
            domain: None,
            index: None,
        }
    }

    /// Build a gate without a domain; entity requirements stay empty until
    /// a domain is supplied to [`RejectionGate::process`].
    pub fn new(config: RejectionConfig) -> Result<Self, GateError> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &RejectionConfig {
        &self.config
    }

    /// Rejection handling tag for downstream consumers
    pub fn method(&self) -> &str {
        &self.config.method
    }

    /// Installed requirement index, if any
    pub fn requirement_index(&self) -> Option<&RequirementIndex> {
        self.index.get()
    }

    /// Build the requirement index from `domain` unless one is installed.
    ///
    /// An index without any requirement is not installed, so a later domain
    /// may still provide one.
    pub fn ensure_index(&self, domain: Option<&DomainSchema>) -> Result<(), GateError> {
        if self.index.get().is_some() {
            return Ok(());
        }
        let Some(domain) = domain else {
            return Ok(());
        };

        let index = RequirementIndex::build(domain)?;
        if !index.is_empty() {
            self.install_index(index);
        }
        Ok(())
    }

    fn install_index(&self, index: RequirementIndex) {
        let intents = index.len();
        if self.index.set(index).is_ok() {
            info!(intents, "Installed required-entity index");
        }
    }

    /// The synthetic intent written onto rejected messages.
    ///
    /// Its confidence is the configured default threshold.
    pub fn rejection_intent(&self) -> Intent {
        Intent::new(REJECTION_INTENT_NAME, self.config.thresholds.default)
    }

    /// Decide whether `message` is a full utterance.
    ///
    /// # Errors
    ///
    /// `GateError::MissingField` when a check needs the intent or its
    /// confidence and the message has none.
    pub fn evaluate(&self, message: &Message) -> Result<Verdict, GateError> {
        if !self.config.enabled {
            debug!("Full utterance: rejection gate disabled");
            return Ok(Verdict::Accept(AcceptReason::Disabled));
        }

        if message.is_final() {
            if self.config.force_final_enabled {
                debug!("Full utterance: forced via is_final");
                return Ok(Verdict::Accept(AcceptReason::ForcedFinal));
            }
            warn!(
                "Message requests a final utterance but force_final_enabled is false; \
                 is_final is ignored"
            );
        }

        let intent_name = message.intent_name()?;
        if self.config.is_excluded(intent_name) {
            debug!(intent = intent_name, "Rejected: intent is excluded");
            return Ok(Verdict::Reject(RejectReason::ExcludedIntent {
                intent: intent_name.to_string(),
            }));
        }

        let confidence = message.intent_confidence()?;
        let threshold_check =
            ThresholdEvaluator::check(intent_name, confidence, message.ranking(), &self.config);
        if let Some(reason) = RejectReason::from_threshold(threshold_check) {
            debug!(intent = intent_name, ?reason, "Rejected: thresholds not reached");
            return Ok(Verdict::Reject(reason));
        }

        if self.config.require_entities_enabled {
            let index = self.index.get().unwrap_or(&EMPTY_INDEX);
            let entity_check =
                EntitySatisfactionChecker::check(intent_name, message.entities(), index);
            if let Some(reason) = RejectReason::from_entities(entity_check) {
                debug!(intent = intent_name, ?reason, "Rejected: required entities not matched");
                return Ok(Verdict::Reject(reason));
            }
        }

        debug!(intent = intent_name, confidence, "Full utterance");
        Ok(Verdict::Accept(AcceptReason::FullUtterance))
    }

    /// Replace the intent with the rejection intent and put the same value
    /// at the front of the ranking, keeping earlier entries in order.
    pub fn apply_rejection(&self, mut message: Message) -> Message {
        let rejection = self.rejection_intent();
        message
            .intent_ranking
            .get_or_insert_with(Vec::new)
            .insert(0, RankedIntent::from(&rejection));
        message.intent = Some(rejection);
        message
    }

    /// Evaluate an ordered batch, rewriting the rejected messages.
    ///
    /// `domain` builds the requirement index if none is installed yet.
    ///
    /// # Errors
    ///
    /// Malformed domains fail with `GateError::Configuration`; a message that
    /// violates the input contract fails the batch with
    /// `GateError::InvalidMessage` carrying its position.
    pub fn process(
        &self,
        messages: Vec<Message>,
        domain: Option<&DomainSchema>,
    ) -> Result<Vec<Message>, GateError> {
        let decided = self.process_with_verdicts(messages, domain)?;
        Ok(decided.into_iter().map(|(message, _)| message).collect())
    }

    /// Like [`RejectionGate::process`], pairing each output message with
    /// the verdict that produced it.
    pub fn process_with_verdicts(
        &self,
        messages: Vec<Message>,
        domain: Option<&DomainSchema>,
    ) -> Result<Vec<(Message, Verdict)>, GateError> {
        self.ensure_index(domain)?;

        let total = messages.len();
        let mut rejected = 0usize;
        let mut processed = Vec::with_capacity(total);

        for (index, message) in messages.into_iter().enumerate() {
            let verdict = self.evaluate(&message).map_err(|e| e.at_index(index))?;
            let message = if verdict.is_accept() {
                message
            } else {
                rejected += 1;
                self.apply_rejection(message)
            };
            processed.push((message, verdict));
        }

        info!(total, rejected, "Processed message batch");
        Ok(processed)
    }
}
