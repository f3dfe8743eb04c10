//! REST errors and their HTTP mapping
//!
//! | Error                         | Status |
//! |-------------------------------|--------|
//! | missing field, invalid input  | 400    |
//! | unknown id                    | 404    |
//! | already exists / actualized   | 409    |
//! | conditions unmet              | 422    |
//! | store failure                 | 500    |
//!
//! Request bodies go through [`ApiJson`], so a malformed or mistyped body
//! is a 400 with the same JSON error shape as every other failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::causality::CausalityError;
use crate::observability::Logger;
use crate::transition::TransitionError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Clone, Error)]
pub enum RestError {
    #[error("Missing required parameter: {0}")]
    MissingParam(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    ConditionsUnmet { message: String, unmet: Vec<String> },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::MissingParam(_) | RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::Conflict(_) => StatusCode::CONFLICT,
            RestError::ConditionsUnmet { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Rejects a blank request field.
pub fn require(field: &str, value: &str) -> RestResult<()> {
    if value.trim().is_empty() {
        Err(RestError::MissingParam(field.to_string()))
    } else {
        Ok(())
    }
}

/// Body rejections are client errors, never 422: that status is reserved
/// for unmet conditions.
impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::Validation(rejection.body_text())
    }
}

/// `Json` extractor whose rejection is a [`RestError`].
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<TransitionError> for RestError {
    fn from(err: TransitionError) -> Self {
        let message = err.to_string();
        match err {
            TransitionError::NotFound { .. } => RestError::NotFound(message),
            TransitionError::InvalidConditionFormat(_) => RestError::Validation(message),
            TransitionError::ConditionsUnmet(unmet) => RestError::ConditionsUnmet { message, unmet },
            TransitionError::AlreadyActualized(_) => RestError::Conflict(message),
            TransitionError::Store(_) => RestError::Internal(message),
        }
    }
}

impl From<CatalogError> for RestError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound { .. } => RestError::NotFound(message),
            CatalogError::Conflict { .. } => RestError::Conflict(message),
            CatalogError::Validation(_) => RestError::Validation(message),
            CatalogError::Store(_) => RestError::Internal(message),
        }
    }
}

impl From<CausalityError> for RestError {
    fn from(err: CausalityError) -> Self {
        let message = err.to_string();
        match err {
            CausalityError::InvalidCauseKind(_) => RestError::Validation(message),
            CausalityError::Store(_) => RestError::Internal(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmet_conditions: Option<Vec<String>>,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        let code = err.status_code().as_u16();
        let error = err.to_string();
        let unmet_conditions = match err {
            RestError::ConditionsUnmet { unmet, .. } => Some(unmet),
            _ => None,
        };
        Self {
            error,
            code,
            unmet_conditions,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            Logger::error("HTTP_REQUEST_FAILED", &[("error", &self.to_string())]);
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
