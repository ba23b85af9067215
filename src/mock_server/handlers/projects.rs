//! Project endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::{error_response, not_found, paged_response, state_error, PageQuery, SharedState};
use crate::models::ProjectPatchBody;
use crate::ProjectPrototype;

/// GET /v1/projects
pub async fn list_projects(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    paged_response("v1/projects", "projects", state.list_projects(), &query)
}

/// GET /v1/projects/{id}
pub async fn get_project(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;

    match state.get_project(&id) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => not_found("project", &id),
    }
}

/// POST /v1/projects
pub async fn create_project(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let prototype: ProjectPrototype = match serde_json::from_value(body) {
        Ok(prototype) => prototype,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let mut state = state.write().await;

    match state.create_project(prototype) {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => state_error(e),
    }
}

/// PATCH /v1/projects/{id}
pub async fn update_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<ProjectPatchBody>,
) -> Response {
    let mut state = state.write().await;

    match state.update_project(&id, body.definition) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => not_found("project", &id),
    }
}

/// DELETE /v1/projects/{id}
pub async fn delete_project(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = state.write().await;

    match state.delete_project(&id) {
        Some(project) => (StatusCode::ACCEPTED, Json(project)).into_response(),
        None => not_found("project", &id),
    }
}
