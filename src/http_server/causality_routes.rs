//! Causal relations

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::errors::{require, ApiJson, RestResult};
use super::state::SharedState;
use crate::causality::CauseKind;
use crate::model::CausalRelation;
use crate::storage::Store;

#[derive(Debug, Deserialize)]
pub struct AddCauseRequest {
    #[serde(default)]
    pub from_entity: String,
    #[serde(default)]
    pub to_entity: String,
    #[serde(default)]
    pub cause_type: String,
}

pub fn causality_routes<S: Store + 'static>() -> Router<SharedState<S>> {
    Router::new()
        .route("/causes", post(add_cause::<S>))
        .route("/substances/:id/causes", get(get_causes::<S>))
        .route("/substances/:id/relations", get(get_relations::<S>))
}

async fn add_cause<S: Store>(
    State(state): State<SharedState<S>>,
    ApiJson(request): ApiJson<AddCauseRequest>,
) -> RestResult<(StatusCode, Json<CausalRelation>)> {
    require("from_entity", &request.from_entity)?;
    require("to_entity", &request.to_entity)?;
    require("cause_type", &request.cause_type)?;

    let relation = state.graph.add_causal_relation(
        &request.from_entity,
        &request.to_entity,
        &request.cause_type,
    )?;
    Ok((StatusCode::CREATED, Json(relation)))
}

/// Latest `to_entity` per cause kind.
async fn get_causes<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<BTreeMap<CauseKind, String>>> {
    Ok(Json(state.graph.causes_summary(&id)?))
}

async fn get_relations<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<BTreeMap<CauseKind, Vec<CausalRelation>>>> {
    Ok(Json(state.graph.relations_by_kind(&id)?))
}
