//! Key-value store adapter.
//!
//! Every persisted collection in Courier lives behind the [`KvStore`] trait,
//! which exposes the small set of list and hash primitives the repositories
//! need. Two implementations are provided:
//!
//! - [`MemoryStore`] - process-local, backed by `DashMap` (tests, ephemeral use)
//! - [`RedisStore`] - Redis via a reconnecting `ConnectionManager`
//!
//! # Example
//!
//! ```
//! use courier::store::{KvStore, MemoryStore};
//!
//! # async fn example() -> Result<(), courier::store::StoreError> {
//! let store = MemoryStore::new();
//! store.push_capped("log", "first".to_string(), 2).await?;
//! store.push_capped("log", "second".to_string(), 2).await?;
//! store.push_capped("log", "third".to_string(), 2).await?;
//!
//! assert_eq!(store.range("log", 10).await?, vec!["third", "second"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod memory_store;
mod redis_store;

pub use error::StoreError;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use crate::config::{StoreBackend, StoreConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// List holding serialized history entries, newest first.
pub const HISTORY_KEY: &str = "request_history";

/// Hash of template id to serialized template.
pub const TEMPLATES_KEY: &str = "request_templates";

/// Hash of group id to serialized group.
pub const GROUPS_KEY: &str = "request_groups";

/// Storage primitives shared by the history, template and group repositories.
///
/// Implementations must make each method atomic with respect to concurrent
/// calls on the same key. No method holds a lock beyond its own call.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Push `value` to the front of the list at `key`, then trim the list to
    /// its first `capacity` elements. Both steps are applied as one unit.
    async fn push_capped(
        &self,
        key: &str,
        value: String,
        capacity: usize,
    ) -> Result<(), StoreError>;

    /// Return up to `limit` elements from the front of the list at `key`.
    async fn range(&self, key: &str, limit: usize) -> Result<Vec<String>, StoreError>;

    /// Set `field` in the hash at `key`, creating the hash if needed.
    async fn hash_set(&self, key: &str, field: &str, value: String) -> Result<(), StoreError>;

    /// Overwrite `field` only if it already exists. Returns whether a write
    /// happened.
    async fn hash_replace(&self, key: &str, field: &str, value: String) -> Result<bool, StoreError>;

    /// Read a single field from the hash at `key`.
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Read every value of the hash at `key`, in the store's enumeration order.
    async fn hash_values(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Remove `field` from the hash at `key`. Returns whether it existed.
    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError>;

    /// Remove `key` entirely. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Open the store selected by configuration.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn KvStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            tracing::info!(url = %config.url, "Connecting to Redis store");
            let store = RedisStore::connect(&config.url).await?;
            Ok(Arc::new(store))
        }
    }
}
