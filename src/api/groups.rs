//! Group endpoint handlers.

use crate::api::{ApiError, ApiJson, AppState, SuccessResponse};
use crate::groups::{Group, GroupUpdate, NewGroup};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// POST /api/groups - Create a group.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(fields): ApiJson<NewGroup>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(state.groups.create(fields).await?))
}

/// GET /api/groups - Every group.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(state.groups.list().await?))
}

/// PUT /api/groups/{id} - Replace a group's name and template list.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<GroupUpdate>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(state.groups.update(&id, update).await?))
}

/// DELETE /api/groups/{id} - Remove a group; unknown ids succeed.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.groups.delete(&id).await?;
    Ok(SuccessResponse::ok())
}
