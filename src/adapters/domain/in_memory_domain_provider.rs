//! In-Memory Domain Provider Adapter
//!
//! Serves a fixed domain schema. Useful for testing and development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::nlu::DomainSchema;
use crate::ports::{DomainLoadError, DomainProvider};

/// In-memory domain provider
#[derive(Debug, Clone, Default)]
pub struct InMemoryDomainProvider {
    schema: DomainSchema,
    loads: Arc<AtomicUsize>,
}

impl InMemoryDomainProvider {
    /// Create a provider serving `schema`
    pub fn new(schema: DomainSchema) -> Self {
        Self {
            schema,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the domain was requested
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl DomainProvider for InMemoryDomainProvider {
    fn load_domain(&self) -> Result<DomainSchema, DomainLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serves_schema_and_counts_loads() {
        let schema = DomainSchema::from_intents(vec![json!("greet")]);
        let provider = InMemoryDomainProvider::new(schema.clone());

        assert_eq!(provider.load_count(), 0);
        assert_eq!(provider.load_domain().unwrap(), schema);
        assert_eq!(provider.load_domain().unwrap(), schema);
        assert_eq!(provider.load_count(), 2);
    }
}
