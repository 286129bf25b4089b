//! Request history.
//!
//! Keeps the last [`HISTORY_CAPACITY`] proxy executions in a single store
//! list, newest first. Recording is one atomic push-and-trim, so readers never
//! observe more than the capacity or a trim that reorders a fresh entry.

mod types;

pub use types::*;

use crate::store::{KvStore, StoreError, HISTORY_KEY};
use std::sync::Arc;

/// Maximum number of retained history entries.
pub const HISTORY_CAPACITY: usize = 100;

/// Number of entries returned when the caller gives no limit.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Store-backed, bounded, newest-first history log.
#[derive(Clone)]
pub struct HistoryRepository {
    store: Arc<dyn KvStore>,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Push `entry` to the front of the log and drop anything past capacity.
    pub async fn record(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        let payload = serde_json::to_string(entry)?;
        self.store
            .push_capped(HISTORY_KEY, payload, HISTORY_CAPACITY)
            .await
    }

    /// Return up to `limit` of the most recent entries, newest first.
    ///
    /// Stored records that no longer parse are skipped.
    pub async fn list(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let limit = limit.min(HISTORY_CAPACITY);
        let raw = self.store.range(HISTORY_KEY, limit).await?;

        Ok(raw
            .iter()
            .filter_map(|item| match serde_json::from_str::<HistoryEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed history entry");
                    None
                }
            })
            .collect())
    }

    /// Remove every entry. Clearing an empty history succeeds.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.delete(HISTORY_KEY).await
    }
}
