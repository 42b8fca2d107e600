//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DomainProvider` - Source of the assistant's domain schema
//! - `MessageStage` - A pipeline stage processing message batches

mod domain_provider;
mod message_stage;

pub use domain_provider::{DomainLoadError, DomainProvider};
pub use message_stage::MessageStage;
