//! # Condition Errors

use thiserror::Error;

/// Result type for condition parsing
pub type ConditionResult<T> = Result<T, ConditionError>;

/// Condition specification errors
///
/// A malformed specification is a caller error, distinct from a
/// well-formed specification whose predicates are not met.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("invalid condition format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConditionError::InvalidFormat("expected a list".into());
        assert_eq!(err.to_string(), "invalid condition format: expected a list");
    }
}
