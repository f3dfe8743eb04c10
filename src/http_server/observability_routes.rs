//! Health and metrics endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::state::SharedState;
use crate::storage::Store;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

pub fn health_routes<S: Store + 'static>() -> Router<SharedState<S>> {
    Router::new().route("/health", get(health_handler))
}

pub fn observability_routes<S: Store + 'static>() -> Router<SharedState<S>> {
    Router::new().route("/metrics", get(metrics_handler::<S>))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        message: "OaaS API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler<S: Store>(State(state): State<SharedState<S>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.to_json()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            message: "OaaS API is running".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
    }
}
