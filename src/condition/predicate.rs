//! Condition specification parsing
//!
//! A specification is a JSON list of predicates:
//!
//! ```text
//! [{"type": "mode", "name": "color", "value": "green"},
//!  {"type": "attribute", "name": "height", "value": 12}]
//! ```
//!
//! Empty text, whitespace, `null`, and `[]` all mean "no conditions".
//! Every element must carry a string `type`, a string `name`, and a scalar
//! `value`. An unrecognised `type` still parses; it fails at evaluation.

use serde::Deserialize;

use super::errors::{ConditionError, ConditionResult};
use crate::model::Scalar;

#[derive(Debug, Deserialize)]
struct RawPredicate {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    value: Scalar,
}

/// One typed predicate of a condition specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The current mode for attribute `name` must equal `value`
    Attribute { name: String, value: Scalar },
    /// Some mode for attribute `name` must equal `value`
    Mode { name: String, value: Scalar },
    /// Truth lives outside this system; always holds
    External { name: String, value: Scalar },
    /// A `type` tag this system does not know; never holds
    Unrecognized {
        kind: String,
        name: String,
        value: Scalar,
    },
}

impl From<RawPredicate> for Predicate {
    fn from(raw: RawPredicate) -> Self {
        let RawPredicate { kind, name, value } = raw;
        match kind.as_str() {
            "attribute" => Predicate::Attribute { name, value },
            "mode" => Predicate::Mode { name, value },
            "external" => Predicate::External { name, value },
            _ => Predicate::Unrecognized { kind, name, value },
        }
    }
}

/// A parsed condition specification: a conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSpec {
    predicates: Vec<Predicate>,
}

impl ConditionSpec {
    /// The specification with no predicates; always satisfied.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse specification text.
    pub fn parse(text: &str) -> ConditionResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::empty());
        }

        let raw: Option<Vec<RawPredicate>> = serde_json::from_str(text)
            .map_err(|e| ConditionError::InvalidFormat(e.to_string()))?;

        Ok(Self {
            predicates: raw
                .unwrap_or_default()
                .into_iter()
                .map(Predicate::from)
                .collect(),
        })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }
}
