//! In-Memory Progress Store Adapter
//!
//! Stores instance records in memory. Useful for testing, development,
//! and session-scoped wizards.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::instance::InstanceRecord;
use crate::ports::{ProgressStore, StoreError};

use super::apply_dot_path;

/// In-memory storage for instance records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressStore {
    records: Arc<RwLock<HashMap<String, InstanceRecord>>>,
}

impl InMemoryProgressStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored records (useful for tests).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored records.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn put(&self, key: &str, record: &InstanceRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<InstanceRecord>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(key))
    }

    async fn forget(&self, key: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn update(&self, key: &str, dot_path: &str, value: Value) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let mut doc = serde_json::to_value(record)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        apply_dot_path(&mut doc, dot_path, value)?;

        let updated: InstanceRecord = serde_json::from_value(doc)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
        records.insert(key.to_string(), updated);
        Ok(())
    }
}
