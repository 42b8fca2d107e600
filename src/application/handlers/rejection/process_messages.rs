//! ProcessMessagesHandler - Run a batch of classified messages through the rejection gate

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::domain::nlu::{DomainSchema, Message};
use crate::domain::rejection::{GateError, RejectionGate, Verdict};
use crate::ports::{DomainLoadError, DomainProvider};

/// Command to process a batch of messages
#[derive(Debug, Clone)]
pub struct ProcessMessagesCommand {
    pub messages: Vec<Message>,
}

/// Result of processing a batch
#[derive(Debug, Clone)]
pub struct ProcessMessagesResult {
    /// Messages in input order, rejected ones rewritten
    pub messages: Vec<Message>,
    /// Verdict per message, same order
    pub verdicts: Vec<Verdict>,
}

impl ProcessMessagesResult {
    /// Number of rejected messages
    pub fn rejected_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_reject()).count()
    }
}

/// Error type for processing messages
#[derive(Debug)]
pub enum ProcessMessagesError {
    /// Domain could not be loaded
    Domain(DomainLoadError),
    /// Gate rejected the domain or a message
    Gate(GateError),
}

impl std::fmt::Display for ProcessMessagesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessMessagesError::Domain(err) => write!(f, "Domain error: {}", err),
            ProcessMessagesError::Gate(err) => write!(f, "Rejection gate error: {}", err),
        }
    }
}

impl std::error::Error for ProcessMessagesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessMessagesError::Domain(err) => Some(err),
            ProcessMessagesError::Gate(err) => Some(err),
        }
    }
}

impl From<DomainLoadError> for ProcessMessagesError {
    fn from(err: DomainLoadError) -> Self {
        ProcessMessagesError::Domain(err)
    }
}

impl From<GateError> for ProcessMessagesError {
    fn from(err: GateError) -> Self {
        ProcessMessagesError::Gate(err)
    }
}

/// Handler for processing message batches
///
/// The domain is requested from the provider once, on the first batch, and
/// offered to the gate with every batch after that.
pub struct ProcessMessagesHandler {
    gate: Arc<RejectionGate>,
    domain_provider: Option<Arc<dyn DomainProvider>>,
    domain: OnceCell<DomainSchema>,
}

impl ProcessMessagesHandler {
    pub fn new(gate: Arc<RejectionGate>) -> Self {
        Self {
            gate,
            domain_provider: None,
            domain: OnceCell::new(),
        }
    }

    /// Supply the domain through a provider
    pub fn with_domain_provider(mut self, provider: Arc<dyn DomainProvider>) -> Self {
        self.domain_provider = Some(provider);
        self
    }

    fn domain(&self) -> Result<Option<&DomainSchema>, DomainLoadError> {
        match &self.domain_provider {
            Some(provider) => self
                .domain
                .get_or_try_init(|| provider.load_domain())
                .map(Some),
            None => Ok(None),
        }
    }

    pub fn handle(
        &self,
        cmd: ProcessMessagesCommand,
    ) -> Result<ProcessMessagesResult, ProcessMessagesError> {
        // 1. Resolve the domain (loaded once)
        let domain = self.domain()?;

        // 2. Decide and rewrite
        let decided = self.gate.process_with_verdicts(cmd.messages, domain)?;

        let (messages, verdicts): (Vec<_>, Vec<_>) = decided.into_iter().unzip();
        let result = ProcessMessagesResult { messages, verdicts };

        info!(
            total = result.messages.len(),
            rejected = result.rejected_count(),
            method = self.gate.method(),
            "Rejection stage finished"
        );
        Ok(result)
    }
}
