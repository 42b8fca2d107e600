//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod rejection;

pub use rejection::{
    ProcessMessagesCommand, ProcessMessagesError, ProcessMessagesHandler, ProcessMessagesResult,
};
