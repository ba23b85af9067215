//! Environment endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{not_found, paged_response, PageQuery, SharedState};
use crate::EnvironmentPrototype;

/// GET /v1/projects/{project_id}/environments
pub async fn list_environments(
    State(state): State<SharedState>,
    Path(project_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;

    if state.get_project(&project_id).is_none() {
        return not_found("project", &project_id);
    }

    paged_response(
        &format!("v1/projects/{project_id}/environments"),
        "environments",
        state.list_environments(&project_id),
        &query,
    )
}

/// GET /v1/projects/{project_id}/environments/{id}
pub async fn get_environment(
    State(state): State<SharedState>,
    Path((project_id, id)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    match state.get_environment(&project_id, &id) {
        Some(environment) => (StatusCode::OK, Json(environment.clone())).into_response(),
        None => not_found("environment", &id),
    }
}

/// POST /v1/projects/{project_id}/environments
pub async fn create_environment(
    State(state): State<SharedState>,
    Path(project_id): Path<String>,
    Json(prototype): Json<EnvironmentPrototype>,
) -> Response {
    let mut state = state.write().await;

    if state.get_project(&project_id).is_none() {
        return not_found("project", &project_id);
    }

    let environment = state.create_environment(&project_id, prototype);
    (StatusCode::CREATED, Json(environment)).into_response()
}

/// DELETE /v1/projects/{project_id}/environments/{id}
pub async fn delete_environment(
    State(state): State<SharedState>,
    Path((project_id, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.write().await;

    match state.delete_environment(&project_id, &id) {
        Some(environment) => (StatusCode::OK, Json(environment)).into_response(),
        None => not_found("environment", &id),
    }
}
