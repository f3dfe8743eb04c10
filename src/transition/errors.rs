//! Transition engine errors
//!
//! Callers branch on the variant: `ConditionsUnmet` means "try again once
//! the facts change", `NotFound` and `InvalidConditionFormat` mean "fix the
//! request", `Store` means the persistence layer failed.

use thiserror::Error;

use crate::condition::ConditionError;
use crate::storage::StorageError;

/// Result type for transition operations
pub type TransitionResult<T> = Result<T, TransitionError>;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid condition format: {0}")]
    InvalidConditionFormat(String),

    #[error("cannot actualize potentiality: conditions not met: [{}]", .0.join("; "))]
    ConditionsUnmet(Vec<String>),

    #[error("potentiality already actualized: {0}")]
    AlreadyActualized(String),

    #[error(transparent)]
    Store(#[from] StorageError),
}

impl TransitionError {
    pub fn substance_not_found(id: &str) -> Self {
        TransitionError::NotFound {
            entity: "substance",
            id: id.to_string(),
        }
    }

    pub fn potentiality_not_found(id: &str) -> Self {
        TransitionError::NotFound {
            entity: "potentiality",
            id: id.to_string(),
        }
    }

    /// Reasons carried by `ConditionsUnmet`, empty for every other variant.
    pub fn unmet_conditions(&self) -> &[String] {
        match self {
            TransitionError::ConditionsUnmet(reasons) => reasons,
            _ => &[],
        }
    }

    /// Whether the same call may succeed later without changing the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransitionError::ConditionsUnmet(_))
    }
}

impl From<ConditionError> for TransitionError {
    fn from(err: ConditionError) -> Self {
        match err {
            ConditionError::InvalidFormat(detail) => TransitionError::InvalidConditionFormat(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_unmet_lists_every_reason() {
        let err = TransitionError::ConditionsUnmet(vec![
            "mode condition not met: color = green".into(),
            "attribute 'season' not found for substance".into(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("color = green"));
        assert!(msg.contains("season"));
        assert_eq!(err.unmet_conditions().len(), 2);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_not_found_names_entity() {
        let err = TransitionError::substance_not_found("nope");
        assert_eq!(err.to_string(), "substance not found: nope");
        assert!(!err.is_retryable());
        assert!(err.unmet_conditions().is_empty());
    }

    #[test]
    fn test_condition_error_converts() {
        let err: TransitionError = ConditionError::InvalidFormat("eof".into()).into();
        assert!(matches!(err, TransitionError::InvalidConditionFormat(ref d) if d == "eof"));
    }
}
