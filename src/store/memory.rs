use std::{
    collections::HashMap,
    sync::Arc,
};

use atomic_counter::{
    AtomicCounter,
    RelaxedCounter,
};
use axum::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::BlobStore;
use crate::error::StoreError;

/// Process-local store. Contents vanish with the process.
#[derive(Clone)]
pub struct MemoryStore {
    blobs: Arc<RwLock<HashMap<String, Value>>>,
    writes: Arc<RelaxedCounter>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(RwLock::new(HashMap::new())),
            writes: Arc::new(RelaxedCounter::new(0)),
        }
    }

    /// Number of `set_json` calls served so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set_json(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.clone());
        self.writes.inc();
        Ok(())
    }
}
