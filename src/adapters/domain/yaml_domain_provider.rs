//! YAML Domain Provider Adapter
//!
//! Reads the `intents` section of a domain YAML file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::nlu::DomainSchema;
use crate::ports::{DomainLoadError, DomainProvider};

/// File-based domain provider
#[derive(Debug, Clone)]
pub struct YamlDomainProvider {
    path: PathBuf,
}

impl YamlDomainProvider {
    /// Create a provider reading from `path`
    ///
    /// # Example
    /// ```ignore
    /// let provider = YamlDomainProvider::new("./domain.yml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DomainProvider for YamlDomainProvider {
    fn load_domain(&self) -> Result<DomainSchema, DomainLoadError> {
        let source = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainLoadError::NotFound(self.path.clone()),
            _ => DomainLoadError::IoError(e.to_string()),
        })?;

        let schema = DomainSchema::from_yaml(&source)
            .map_err(|e| DomainLoadError::ParseFailed(e.to_string()))?;

        debug!(path = %self.path.display(), intents = schema.intents.len(), "Loaded domain");
        Ok(schema)
    }
}
