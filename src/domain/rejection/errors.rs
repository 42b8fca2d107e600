//! Error types for the rejection gate

/// Rejection gate errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum GateError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Message is missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Configured feature is not implemented and has no effect: {feature}")]
    UnimplementedFeature { feature: &'static str },

    #[error("Message {index} in batch: {source}")]
    InvalidMessage {
        index: usize,
        #[source]
        source: Box<GateError>,
    },
}

impl GateError {
    /// Creates a configuration error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        GateError::Configuration(reason.into())
    }

    /// Attach the batch position of the offending message.
    pub fn at_index(self, index: usize) -> Self {
        GateError::InvalidMessage {
            index,
            source: Box::new(self),
        }
    }
}
