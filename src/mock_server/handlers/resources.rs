//! Resource endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use super::{not_found, paged_response, PageQuery, SharedState};

/// GET /v1/projects/{project_id}/resources
pub async fn list_resources(
    State(state): State<SharedState>,
    Path(project_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;

    if state.get_project(&project_id).is_none() {
        return not_found("project", &project_id);
    }

    paged_response(
        &format!("v1/projects/{project_id}/resources"),
        "resources",
        state.list_resources(&project_id),
        &query,
    )
}
