//! Template endpoint handlers.

use crate::api::{ApiError, ApiJson, AppState, SuccessResponse};
use crate::templates::{NewTemplate, Template};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// POST /api/templates - Save a new template.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(fields): ApiJson<NewTemplate>,
) -> Result<Json<Template>, ApiError> {
    let template = state.templates.create(fields).await?;
    Ok(Json(template))
}

/// GET /api/templates - Every saved template.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Template>>, ApiError> {
    Ok(Json(state.templates.list().await?))
}

/// GET /api/templates/{id} - One template, or 404.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    state
        .templates
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&format!("Template not found: {}", id)))
}

/// DELETE /api/templates/{id} - Remove a template; unknown ids succeed.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.templates.delete(&id).await?;
    Ok(SuccessResponse::ok())
}
