//! Configuration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::{error_response, not_found, paged_response, state_error, PageQuery, SharedState};
use crate::{ConfigPatch, ConfigPrototype};

fn configs_path(project_id: &str) -> String {
    format!("v1/projects/{project_id}/configs")
}

/// GET /v1/projects/{project_id}/configs
pub async fn list_configs(
    State(state): State<SharedState>,
    Path(project_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;

    if state.get_project(&project_id).is_none() {
        return not_found("project", &project_id);
    }

    paged_response(
        &configs_path(&project_id),
        "configs",
        state.list_configs(&project_id),
        &query,
    )
}

/// GET /v1/projects/{project_id}/configs/{id}
pub async fn get_config(
    State(state): State<SharedState>,
    Path((project_id, id)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    match state.get_config(&project_id, &id) {
        Some(config) => (StatusCode::OK, Json(config.clone())).into_response(),
        None => not_found("config", &id),
    }
}

/// POST /v1/projects/{project_id}/configs
///
/// The body is decoded as a definition prototype, so a definition without a
/// resolvable variant is answered with 400 and the decode message.
pub async fn create_config(
    State(state): State<SharedState>,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let prototype: ConfigPrototype = match serde_json::from_value(body) {
        Ok(prototype) => prototype,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let mut state = state.write().await;

    if state.get_project(&project_id).is_none() {
        return not_found("project", &project_id);
    }

    match state.create_config(&project_id, prototype) {
        Ok(config) => (StatusCode::CREATED, Json(config)).into_response(),
        Err(e) => state_error(e),
    }
}

/// PATCH /v1/projects/{project_id}/configs/{id}
pub async fn update_config(
    State(state): State<SharedState>,
    Path((project_id, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let patch: ConfigPatch = match serde_json::from_value(body) {
        Ok(patch) => patch,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let mut state = state.write().await;

    match state.update_config(&project_id, &id, patch) {
        Ok(Some(config)) => (StatusCode::OK, Json(config.clone())).into_response(),
        Ok(None) => not_found("config", &id),
        Err(e) => state_error(e),
    }
}

/// DELETE /v1/projects/{project_id}/configs/{id}
pub async fn delete_config(
    State(state): State<SharedState>,
    Path((project_id, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.write().await;

    match state.delete_config(&project_id, &id) {
        Some(config) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": config.id, "definition": { "name": config.name() } })),
        )
            .into_response(),
        None => not_found("config", &id),
    }
}
