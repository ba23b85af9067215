//! HTTP request handlers for the mock server.

pub mod configs;
pub mod environments;
pub mod projects;
pub mod resources;

pub use configs::*;
pub use environments::*;
pub use projects::*;
pub use resources::*;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use crate::error::ProjectsError;
use crate::mock_server::state::MockState;
use crate::pagination::TOKEN_PARAM;

/// State handle shared by every handler.
pub type SharedState = Arc<RwLock<MockState>>;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;
const TOKEN_PREFIX: &str = "next-";

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub token: Option<String>,
}

/// Answer a list request with one page of `items` under `key`.
///
/// The `next` link is relative and carries the offset of the following
/// page as its continuation token. It is omitted on the last page.
pub(crate) fn paged_response<T: Serialize>(
    path: &str,
    key: &str,
    items: Vec<&T>,
    query: &PageQuery,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let start = match query.token.as_deref() {
        None => 0,
        Some(token) => match token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|offset| offset.parse::<usize>().ok())
        {
            Some(offset) => offset,
            None => {
                return error_response(StatusCode::BAD_REQUEST, format!("Invalid token: {token}"))
            }
        },
    };

    let end = start.saturating_add(limit as usize).min(items.len());
    let page = items.get(start..end).unwrap_or(&[]);

    let mut body = Map::new();
    body.insert("limit".to_string(), json!(limit));
    body.insert(
        "first".to_string(),
        json!({ "href": format!("/{path}?limit={limit}") }),
    );
    if end < items.len() {
        body.insert(
            "next".to_string(),
            json!({ "href": format!("/{path}?limit={limit}&{TOKEN_PARAM}={TOKEN_PREFIX}{end}") }),
        );
    }
    match serde_json::to_value(page) {
        Ok(items) => body.insert(key.to_string(), items),
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    (StatusCode::OK, Json(Value::Object(body))).into_response()
}

/// An error body in the shape the API uses.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    (
        status,
        Json(json!({
            "status_code": status.as_u16(),
            "errors": [{
                "code": status.canonical_reason().unwrap_or("error"),
                "message": message
            }]
        })),
    )
        .into_response()
}

/// Map a state error to a response: undecodable definitions are the
/// caller's fault, anything else is ours.
pub(crate) fn state_error(error: ProjectsError) -> Response {
    let status = match error {
        ProjectsError::Decode(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.to_string())
}

pub(crate) fn not_found(entity: &str, id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("No {entity} found with ID: {id}"),
    )
}

/// Reject requests without the expected bearer token, if one is configured.
pub async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(expected) = required {
        let presented = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        if presented != Some(expected.as_str()) {
            return error_response(StatusCode::UNAUTHORIZED, "Missing or invalid bearer token");
        }
    }

    next.run(request).await
}
