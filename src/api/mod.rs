//! # HTTP API
//!
//! JSON endpoints consumed by the request tester front end.
//!
//! ## Endpoints
//!
//! - `POST /api/proxy` - Execute a request upstream and record it
//! - `GET /api/history?limit=50` - Recent executions, newest first
//! - `DELETE /api/history` - Clear history
//! - `GET|POST /api/templates`, `GET|DELETE /api/templates/{id}`
//! - `GET|POST /api/groups`, `PUT|DELETE /api/groups/{id}`
//! - `GET /health` - Liveness and store reachability
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use courier::api::{AppState, create_router};
//! use courier::config::CourierConfig;
//! use courier::store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let config = Arc::new(CourierConfig::default());
//!
//! let state = Arc::new(AppState::new(store, config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors are returned as a flat JSON object:
//! ```json
//! { "error": "connect error: connection refused", "code": "ECONNREFUSED" }
//! ```

mod extract;
mod groups;
mod health;
mod history;
mod proxy;
mod templates;
pub mod types;

pub use extract::{ApiJson, ApiQuery};
pub use types::*;

use crate::config::CourierConfig;
use crate::groups::GroupRepository;
use crate::history::HistoryRepository;
use crate::logging::make_request_span;
use crate::metrics::MetricsCollector;
use crate::proxy::{ProxyError, ProxyExecutor};
use crate::store::KvStore;
use crate::templates::TemplateRepository;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<CourierConfig>,
    pub store: Arc<dyn KvStore>,
    pub proxy: ProxyExecutor,
    pub history: HistoryRepository,
    pub templates: TemplateRepository,
    pub groups: GroupRepository,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Wire repositories and the proxy executor onto `store`.
    pub fn new(store: Arc<dyn KvStore>, config: Arc<CourierConfig>) -> Result<Self, ProxyError> {
        let history = HistoryRepository::new(Arc::clone(&store));
        let proxy = ProxyExecutor::new(&config.proxy, history.clone())?
            .with_body_logging(config.logging.log_bodies);
        Ok(Self {
            templates: TemplateRepository::new(Arc::clone(&store)),
            groups: GroupRepository::new(Arc::clone(&store)),
            history,
            proxy,
            store,
            metrics_collector: Arc::new(MetricsCollector::install(Instant::now())),
            config,
        })
    }
}

/// Create the main router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/proxy", post(proxy::handle))
        .route("/history", get(history::list).delete(history::clear))
        .route("/templates", get(templates::list).post(templates::create))
        .route("/templates/:id", get(templates::show).delete(templates::remove))
        .route("/groups", get(groups::list).post(groups::create))
        .route("/groups/:id", put(groups::update).delete(groups::remove));

    let mut router = Router::new()
        .nest("/api", api)
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    if state.config.server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}
