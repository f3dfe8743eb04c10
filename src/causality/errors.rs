//! Causal graph errors

use thiserror::Error;

use crate::storage::StorageError;

pub type CausalityResult<T> = Result<T, CausalityError>;

#[derive(Debug, Error)]
pub enum CausalityError {
    #[error("invalid cause type: {0}. Must be one of: material, formal, efficient, final")]
    InvalidCauseKind(String),

    #[error(transparent)]
    Store(#[from] StorageError),
}
