//! Domain schema source configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where the domain schema (intent declarations) is read from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainSourceConfig {
    /// Path to a domain YAML file; without it no entity requirements apply
    pub path: Option<PathBuf>,
}
