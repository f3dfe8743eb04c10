//! Condition specifications and their evaluation
//!
//! A potentiality is gated by a conjunction of typed predicates:
//! - `attribute`: the substance's current mode for the attribute has the value
//! - `mode`: some mode of the substance for the attribute has the value
//! - `external`: decided outside this system; always holds here
//!
//! Any other `type` tag parses but never holds. There is no disjunction or
//! negation.

mod errors;
mod evaluator;
mod predicate;

pub use errors::{ConditionError, ConditionResult};
pub use evaluator::{evaluate, Verdict};
pub use predicate::{ConditionSpec, Predicate};
