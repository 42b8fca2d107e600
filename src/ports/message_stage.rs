//! Message Stage Port - Contract between a pipeline runtime and its stages.

use crate::domain::nlu::{DomainSchema, Message};
use crate::domain::rejection::{GateError, RejectionGate};

/// A stage that receives an ordered batch of messages and returns the same
/// batch, with some entries possibly rewritten.
pub trait MessageStage: Send + Sync {
    /// Stage name for logs
    fn name(&self) -> &'static str;

    /// Process a batch; `domain` is offered to stages that derive state from it.
    fn process(
        &self,
        messages: Vec<Message>,
        domain: Option<&DomainSchema>,
    ) -> Result<Vec<Message>, GateError>;
}

impl MessageStage for RejectionGate {
    fn name(&self) -> &'static str {
        "utterance_rejection"
    }

    fn process(
        &self,
        messages: Vec<Message>,
        domain: Option<&DomainSchema>,
    ) -> Result<Vec<Message>, GateError> {
        RejectionGate::process(self, messages, domain)
    }
}
