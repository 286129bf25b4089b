//! Shared test utilities for Courier integration tests.
//!
//! Provides app builders, request helpers and a store that fails on demand.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use courier::api::{create_router, AppState};
use courier::config::CourierConfig;
use courier::store::{KvStore, MemoryStore, StoreError};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// =============================================================================
// App Builders
// =============================================================================

/// Router and state over a fresh in-memory store with default config.
pub fn make_app() -> (axum::Router, Arc<AppState>) {
    make_app_with(Arc::new(MemoryStore::new()), CourierConfig::default())
}

/// Router and state over `store` with `config`.
pub fn make_app_with(
    store: Arc<dyn KvStore>,
    config: CourierConfig,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(store, Arc::new(config)).unwrap());
    (create_router(Arc::clone(&state)), state)
}

/// Default config with a short proxy timeout, for timeout tests.
pub fn config_with_timeout(seconds: u64) -> CourierConfig {
    let mut config = CourierConfig::default();
    config.proxy.timeout_seconds = seconds;
    config
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Build a request with a JSON body.
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body.
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// An address on localhost with nothing listening.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

// =============================================================================
// Failing Store
// =============================================================================

/// In-memory store whose list writes and pings can be made to fail.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FailingStore {
    /// A store that rejects every history append.
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KvStore for FailingStore {
    async fn push_capped(
        &self,
        key: &str,
        value: String,
        capacity: usize,
    ) -> Result<(), StoreError> {
        self.check()?;
        self.inner.push_capped(key, value, capacity).await
    }

    async fn range(&self, key: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        self.inner.range(key, limit).await
    }

    async fn hash_set(&self, key: &str, field: &str, value: String) -> Result<(), StoreError> {
        self.check()?;
        self.inner.hash_set(key, field, value).await
    }

    async fn hash_replace(
        &self,
        key: &str,
        field: &str,
        value: String,
    ) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.hash_replace(key, field, value).await
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.inner.hash_get(key, field).await
    }

    async fn hash_values(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.inner.hash_values(key).await
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.hash_delete(key, field).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(key).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
