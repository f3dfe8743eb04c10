//! Ontology data model
//!
//! The records tracked by the store:
//! - Substance: an independently existing entity
//! - Kind: a natural classification label
//! - Attribute: a named, typed property definition
//! - Mode: the fact that one substance has one attribute at one value
//! - Potentiality: a possible future state of a substance, gated by conditions
//! - Actuality: the immutable record that a potentiality was realized
//! - CausalRelation: a kind-tagged directed edge between two identifiers
//!
//! Identity is an opaque UUID string assigned at construction and never
//! changed afterwards.

mod entities;
mod scalar;

pub use entities::{
    Actuality, Attribute, CausalRelation, DataType, Kind, Mode, Potentiality, Substance,
};
pub use scalar::Scalar;

/// Generates a fresh opaque record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns an error message if `value` is blank.
pub(crate) fn require_field(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}
