//! Transition engine
//!
//! Owns the potentiality lifecycle:
//! - `create_potentiality` declares a gated future state of a substance
//! - `check_readiness` evaluates its conditions without side effects
//! - `actualize` re-checks and commits an actuality in one exclusive
//!   store update
//!
//! The actualization policy decides whether a realized potentiality may
//! be actualized again.

mod engine;
mod errors;
mod evolution;
mod state;

pub use engine::TransitionEngine;
pub use errors::{TransitionError, TransitionResult};
pub use evolution::SubstanceEvolution;
pub use state::{ActualizationPolicy, PotentialityState};
