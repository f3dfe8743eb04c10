//! Substances, kinds, attributes and modes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::errors::{require, ApiJson, RestResult};
use super::state::SharedState;
use crate::catalog::SubstancePatch;
use crate::model::{Attribute, Kind, Mode, Substance};
use crate::storage::Store;

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateSubstanceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub essence: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubstanceRequest {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub essence: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateKindRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAttributeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateModeRequest {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub substance_id: String,
    #[serde(default)]
    pub attribute_id: String,
}

// ==================
// Router
// ==================

pub fn ontology_routes<S: Store + 'static>() -> Router<SharedState<S>> {
    Router::new()
        .route("/substances", get(list_substances::<S>).post(create_substance::<S>))
        .route(
            "/substances/:id",
            get(get_substance::<S>)
                .put(update_substance::<S>)
                .delete(delete_substance::<S>),
        )
        .route("/kinds", get(list_kinds::<S>).post(create_kind::<S>))
        .route("/attributes", get(list_attributes::<S>).post(create_attribute::<S>))
        .route("/modes", get(list_modes::<S>).post(create_mode::<S>))
}

// ==================
// Substances
// ==================

async fn list_substances<S: Store>(State(state): State<SharedState<S>>) -> RestResult<Json<Value>> {
    let substances = state.catalog.list_substances()?;
    Ok(Json(json!({ "substances": substances })))
}

async fn get_substance<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<Substance>> {
    Ok(Json(state.catalog.get_substance(&id)?))
}

async fn create_substance<S: Store>(
    State(state): State<SharedState<S>>,
    ApiJson(request): ApiJson<CreateSubstanceRequest>,
) -> RestResult<(StatusCode, Json<Substance>)> {
    require("name", &request.name)?;
    require("kind", &request.kind)?;
    require("essence", &request.essence)?;

    let substance = state
        .catalog
        .create_substance(&request.name, &request.kind, &request.essence)?;
    Ok((StatusCode::CREATED, Json(substance)))
}

async fn update_substance<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateSubstanceRequest>,
) -> RestResult<Json<Substance>> {
    let patch = SubstancePatch {
        name: request.name,
        kind: request.kind,
        essence: request.essence,
    };
    Ok(Json(state.catalog.update_substance(&id, patch)?))
}

async fn delete_substance<S: Store>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<Value>> {
    state.catalog.delete_substance(&id)?;
    Ok(Json(json!({ "message": "substance deleted" })))
}

// ==================
// Kinds
// ==================

async fn list_kinds<S: Store>(State(state): State<SharedState<S>>) -> RestResult<Json<Value>> {
    let kinds = state.catalog.list_kinds()?;
    Ok(Json(json!({ "kinds": kinds })))
}

async fn create_kind<S: Store>(
    State(state): State<SharedState<S>>,
    ApiJson(request): ApiJson<CreateKindRequest>,
) -> RestResult<(StatusCode, Json<Kind>)> {
    require("name", &request.name)?;
    let kind = state.catalog.create_kind(&request.name, &request.description)?;
    Ok((StatusCode::CREATED, Json(kind)))
}

// ==================
// Attributes
// ==================

async fn list_attributes<S: Store>(State(state): State<SharedState<S>>) -> RestResult<Json<Value>> {
    let attributes = state.catalog.list_attributes()?;
    Ok(Json(json!({ "attributes": attributes })))
}

async fn create_attribute<S: Store>(
    State(state): State<SharedState<S>>,
    ApiJson(request): ApiJson<CreateAttributeRequest>,
) -> RestResult<(StatusCode, Json<Attribute>)> {
    require("name", &request.name)?;
    require("data_type", &request.data_type)?;

    let attribute =
        state
            .catalog
            .create_attribute(&request.name, &request.description, &request.data_type)?;
    Ok((StatusCode::CREATED, Json(attribute)))
}

// ==================
// Modes
// ==================

async fn list_modes<S: Store>(State(state): State<SharedState<S>>) -> RestResult<Json<Value>> {
    let modes = state.catalog.list_modes()?;
    Ok(Json(json!({ "modes": modes })))
}

async fn create_mode<S: Store>(
    State(state): State<SharedState<S>>,
    ApiJson(request): ApiJson<CreateModeRequest>,
) -> RestResult<(StatusCode, Json<Mode>)> {
    require("value", &request.value)?;
    require("substance_id", &request.substance_id)?;
    require("attribute_id", &request.attribute_id)?;

    let mode =
        state
            .catalog
            .create_mode(&request.value, &request.substance_id, &request.attribute_id)?;
    Ok((StatusCode::CREATED, Json(mode)))
}
