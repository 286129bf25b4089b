//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub store: String,
}

/// GET /health - Report liveness and whether the store answers.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, store) = match state.store.ping().await {
        Ok(()) => ("healthy", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Store ping failed");
            ("degraded", "unreachable")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        store: store.to_string(),
    })
}
