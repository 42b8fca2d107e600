//! Adapters - Implementations of port interfaces.
//!
//! - `domain` - Domain schema providers (YAML file, in-memory)

pub mod domain;

pub use domain::{InMemoryDomainProvider, YamlDomainProvider};
