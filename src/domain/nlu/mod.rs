//! NLU data carried through the pipeline: the message envelope and the
//! domain schema that declares per-intent entity requirements.

mod domain_schema;
mod message;

pub use domain_schema::DomainSchema;
pub use message::{Entity, EntityLabel, Intent, Message, RankedIntent};
