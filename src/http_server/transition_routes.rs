//! Potentialities, readiness, actualization and evolution

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::errors::{require, ApiJson, RestResult};
use super::state::SharedState;
use crate::model::{Actuality, Potentiality};
use crate::storage::Store;
use crate::transition::SubstanceEvolution;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreatePotentialityRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Condition specification text
    #[serde(default)]
    pub conditions: String,
    #[serde(default)]
    pub substance_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ActualizeRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub can_actualize: bool,
    pub unmet_conditions: Vec<String>,
}

// ==================
// Router
// ==================

pub fn transition_routes<S: Store + 'static>() -> Router<SharedState<S>> {
    Router::new()
        .route(
            "/potentialities",
            get(list_potentialities::<S>).post(create_potentiality::<S>),
        )
        .route("/potentialities/:id/conditions", get(check_conditions::<S>))
        .route("/potentialities/:id/actualize", post(actualize::<S>))
        .route("/substances/:id/evolution", get(get_evolution::<S>))
}

// ==================
// Handlers
// ==================

async fn list_potentialities<S: Store>(
    State(state): State<SharedState<S>>,
) -> RestResult<Json<Value>> {
    let potentialities = state.engine.list_potentialities()?;
    Ok(Json(json!({ "potentialities": potentialities })))
}

async fn create_potentiality<S: Store>(
    State(state): State<SharedState<S>>,
    ApiJson(request): ApiJson<CreatePotentialityRequest>,
) -> RestResult<(StatusCode, Json<Potentiality>)> {
    require("name", &request.name)?;
    require("substance_id", &request.substance_id)?;

    let potentiality = state.engine.create_potentiality(
        &request.substance_id,
        &request.name,
        &request.description,
        &request.conditions,
    )?;
    Ok((StatusCode::CREATED, Json(potentiality)))
}

async fn check_conditions<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<ReadinessResponse>> {
    let verdict = state.engine.check_readiness(&id)?;
    Ok(Json(ReadinessResponse {
        can_actualize: verdict.satisfied,
        unmet_conditions: verdict.unmet,
    }))
}

async fn actualize<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ActualizeRequest>,
) -> RestResult<(StatusCode, Json<Actuality>)> {
    require("description", &request.description)?;
    let actuality = state.engine.actualize(&id, &request.description)?;
    Ok((StatusCode::CREATED, Json(actuality)))
}

async fn get_evolution<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<SubstanceEvolution>> {
    Ok(Json(state.engine.evolution(&id)?))
}
