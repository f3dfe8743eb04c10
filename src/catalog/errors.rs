//! Catalog errors

use thiserror::Error;

use crate::storage::StorageError;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {name}")]
    Conflict { entity: &'static str, name: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StorageError),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, name: &str) -> Self {
        CatalogError::Conflict {
            entity,
            name: name.to_string(),
        }
    }
}

impl From<String> for CatalogError {
    fn from(message: String) -> Self {
        CatalogError::Validation(message)
    }
}
