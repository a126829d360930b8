//! In-Memory Instance Repository Adapter
//!
//! Durable-backend stand-in keyed by (wizard id, instance id). Useful
//! for testing the out-of-session editing flows without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{InstanceId, WizardId};
use crate::domain::instance::InstanceRecord;
use crate::ports::{InstanceRepository, StoreError};

/// In-memory durable storage for instance records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInstanceRepository {
    records: Arc<RwLock<HashMap<(WizardId, InstanceId), InstanceRecord>>>,
}

impl InMemoryInstanceRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl InstanceRepository for InMemoryInstanceRepository {
    async fn find(
        &self,
        wizard_id: &WizardId,
        instance_id: InstanceId,
    ) -> Result<Option<InstanceRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .get(&(wizard_id.clone(), instance_id))
            .cloned())
    }

    async fn save(&self, record: &InstanceRecord) -> Result<(), StoreError> {
        self.records.write().await.insert(
            (record.wizard_id.clone(), record.instance_id),
            record.clone(),
        );
        Ok(())
    }

    async fn delete(
        &self,
        wizard_id: &WizardId,
        instance_id: InstanceId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .records
            .write()
            .await
            .remove(&(wizard_id.clone(), instance_id))
            .is_some())
    }
}
