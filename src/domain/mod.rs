//! Domain layer containing the decision logic and the data it reads.
//!
//! # Module Organization
//!
//! - `nlu` - Message envelope and domain schema types
//! - `rejection` - Rejection gate, its checks and verdicts

pub mod nlu;
pub mod rejection;
