use super::{KvStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, VecDeque};

/// In-process [`KvStore`] backed by concurrent maps.
///
/// Lists and hashes live in separate maps. Each operation takes the shard
/// lock for its key, so a push-and-trim is never observed half applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: DashMap<String, VecDeque<String>>,
    hashes: DashMap<String, HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn push_capped(
        &self,
        key: &str,
        value: String,
        capacity: usize,
    ) -> Result<(), StoreError> {
        let mut list = self.lists.entry(key.to_string()).or_default();
        list.push_front(value);
        list.truncate(capacity);
        Ok(())
    }

    async fn range(&self, key: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lists
            .get(key)
            .map(|list| list.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn hash_set(&self, key: &str, field: &str, value: String) -> Result<(), StoreError> {
        self.hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }

    async fn hash_replace(
        &self,
        key: &str,
        field: &str,
        value: String,
    ) -> Result<bool, StoreError> {
        if let Some(mut hash) = self.hashes.get_mut(key) {
            if let Some(slot) = hash.get_mut(field) {
                *slot = value;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .hashes
            .get(key)
            .and_then(|hash| hash.get(field).cloned()))
    }

    async fn hash_values(&self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .hashes
            .get(key)
            .map(|hash| hash.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError> {
        Ok(self
            .hashes
            .get_mut(key)
            .map(|mut hash| hash.remove(field).is_some())
            .unwrap_or(false))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.lists.remove(key);
        self.hashes.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
