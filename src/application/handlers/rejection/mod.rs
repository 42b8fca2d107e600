//! Rejection handlers.

mod process_messages;

pub use process_messages::{
    ProcessMessagesCommand, ProcessMessagesError, ProcessMessagesHandler, ProcessMessagesResult,
};
