//! Proxy endpoint handler.

use crate::api::{ApiError, AppState};
use crate::proxy::{ProxyRequest, ProxyResponse};
use crate::api::ApiJson;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /api/proxy - Execute a request upstream and return the captured response.
///
/// Upstream 4xx/5xx responses come back as 200 with the upstream status in
/// the body; only transport failures produce an error status.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ProxyRequest>,
) -> Result<Json<ProxyResponse>, ApiError> {
    let response = state.proxy.execute(request).await?;
    Ok(Json(response))
}
