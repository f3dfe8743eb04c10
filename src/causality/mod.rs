//! Causal graph
//!
//! Kind-tagged directed edges between identifiers, queried by either
//! endpoint. Independent of the transition engine.

mod errors;
mod graph;
mod kind;

pub use errors::{CausalityError, CausalityResult};
pub use graph::CausalGraph;
pub use kind::CauseKind;
