//! Domain Adapters
//!
//! Implementations of the DomainProvider port.
//!
//! ## Available Adapters
//!
//! - **YamlDomainProvider** - Reads a domain YAML file from disk
//! - **InMemoryDomainProvider** - Serves a fixed schema (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::domain::{InMemoryDomainProvider, YamlDomainProvider};
//!
//! // Production: domain file shipped with the assistant
//! let provider = YamlDomainProvider::new("./domain.yml");
//!
//! // Testing: fixed schema
//! let provider = InMemoryDomainProvider::new(DomainSchema::default());
//! ```

mod in_memory_domain_provider;
mod yaml_domain_provider;

pub use in_memory_domain_provider::InMemoryDomainProvider;
pub use yaml_domain_provider::YamlDomainProvider;
