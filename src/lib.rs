//! Utterance Gate - Rejection Stage for NLU Pipelines
//!
//! Decides, per classified message, whether the prediction is a full
//! utterance or should be replaced by the `nlu_fallback` rejection intent,
//! based on confidence thresholds, ranking ambiguity, excluded intents and
//! per-intent required entities.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
