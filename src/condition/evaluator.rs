//! Condition evaluation against recorded facts
//!
//! Every predicate is evaluated; failures do not short-circuit. The verdict
//! is the conjunction of all predicates and carries one reason per failing
//! predicate, in specification order.

use serde::Serialize;

use super::predicate::{ConditionSpec, Predicate};
use crate::model::Scalar;
use crate::storage::{FactStore, StorageResult};

/// Outcome of evaluating a specification for one substance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub satisfied: bool,
    pub unmet: Vec<String>,
}

impl Verdict {
    fn from_reasons(unmet: Vec<String>) -> Self {
        Self {
            satisfied: unmet.is_empty(),
            unmet,
        }
    }
}

/// Evaluate `spec` for `substance_id`.
///
/// Storage failures propagate; they are never folded into unmet reasons.
pub fn evaluate<F>(facts: &F, substance_id: &str, spec: &ConditionSpec) -> StorageResult<Verdict>
where
    F: FactStore + ?Sized,
{
    let mut unmet = Vec::new();
    for predicate in spec.predicates() {
        if let Some(reason) = check(facts, substance_id, predicate)? {
            unmet.push(reason);
        }
    }
    Ok(Verdict::from_reasons(unmet))
}

/// `None` when the predicate holds, otherwise the reason it does not.
fn check<F>(facts: &F, substance_id: &str, predicate: &Predicate) -> StorageResult<Option<String>>
where
    F: FactStore + ?Sized,
{
    match predicate {
        Predicate::Attribute { name, value } => check_attribute(facts, substance_id, name, value),
        Predicate::Mode { name, value } => check_mode(facts, substance_id, name, value),
        Predicate::External { .. } => Ok(None),
        Predicate::Unrecognized { kind, .. } => {
            Ok(Some(format!("unknown condition type: {}", kind)))
        }
    }
}

fn check_attribute<F>(
    facts: &F,
    substance_id: &str,
    name: &str,
    expected: &Scalar,
) -> StorageResult<Option<String>>
where
    F: FactStore + ?Sized,
{
    let Some(mode) = facts.find_mode(substance_id, name)? else {
        return Ok(Some(format!("attribute '{}' not found for substance", name)));
    };

    if expected.matches_text(&mode.value) {
        Ok(None)
    } else {
        Ok(Some(format!(
            "attribute '{}' has value '{}', expected '{}'",
            name, mode.value, expected
        )))
    }
}

fn check_mode<F>(
    facts: &F,
    substance_id: &str,
    name: &str,
    expected: &Scalar,
) -> StorageResult<Option<String>>
where
    F: FactStore + ?Sized,
{
    if facts.mode_exists(substance_id, name, &expected.as_text())? {
        Ok(None)
    } else {
        Ok(Some(format!("mode condition not met: {} = {}", name, expected)))
    }
}
