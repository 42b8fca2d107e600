//! Domain Provider Port - Interface for supplying the conversation domain.
//!
//! The rejection gate only needs the intent declarations of a domain. Where
//! those come from (a YAML file, a model archive, a test fixture) is decided
//! by the adapter.

use std::path::PathBuf;

use crate::domain::nlu::DomainSchema;

/// Errors that can occur while loading a domain
#[derive(Debug, thiserror::Error)]
pub enum DomainLoadError {
    #[error("Domain file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to parse domain: {0}")]
    ParseFailed(String),
}

/// Port for loading the conversation domain.
///
/// # Contract
///
/// Implementations must:
/// - Return the intent declarations exactly as declared (no normalization)
/// - Return an empty schema, not an error, when a domain declares no intents
pub trait DomainProvider: Send + Sync {
    /// Load the domain schema
    fn load_domain(&self) -> Result<DomainSchema, DomainLoadError>;
}
