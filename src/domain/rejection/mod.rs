//! Utterance Rejection Domain Module
//!
//! Decides whether a classified utterance is a full utterance that downstream
//! action selection can act on, or whether it is replaced by the rejection
//! (fallback) intent.
//!
//! # Components
//!
//! - `EntityRequirement` - Canonical `{type, role, group}` requirement, normalized from domain declarations
//! - `RequirementIndex` - Intent name -> required entities, built from a `DomainSchema`
//! - `ThresholdEvaluator` - Default, custom and ambiguity threshold checks
//! - `EntitySatisfactionChecker` - Predicted vs. required entity comparison
//! - `RejectionGate` - Ordered decision over all checks and the rejection rewrite
//!
//! # Example
//!
//! ```ignore
//! use utterance_gate::config::RejectionConfig;
//! use utterance_gate::domain::rejection::RejectionGate;
//!
//! let gate = RejectionGate::builder(RejectionConfig::default())
//!     .with_domain(&schema)
//!     .build()?;
//! let messages = gate.process(messages, None)?;
//! ```

mod entity_checker;
mod entity_requirement;
mod errors;
mod gate;
mod requirement_index;
mod threshold_evaluator;
mod verdict;

pub use entity_checker::{EntityCheck, EntitySatisfactionChecker};
pub use entity_requirement::EntityRequirement;
pub use errors::GateError;
pub use gate::{RejectionGate, RejectionGateBuilder};
pub use requirement_index::RequirementIndex;
pub use threshold_evaluator::{ThresholdCheck, ThresholdEvaluator, ASSUMED_CONFIDENCE};
pub use verdict::{AcceptReason, RejectReason, Verdict};
