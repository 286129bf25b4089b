//! History endpoint handlers.

use crate::api::{ApiError, ApiQuery, AppState, SuccessResponse};
use crate::history::{HistoryEntry, DEFAULT_LIST_LIMIT};
use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// GET /api/history - Most recent executions, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let entries = state.history.list(limit).await?;
    Ok(Json(entries))
}

/// DELETE /api/history - Remove every history entry.
pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Json<SuccessResponse>, ApiError> {
    state.history.clear().await?;
    tracing::info!("History cleared");
    Ok(SuccessResponse::ok())
}
