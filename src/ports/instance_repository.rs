//! InstanceRepository port - optional durable backend.
//!
//! Used only by out-of-session flows (`load_from_storage`,
//! `delete_wizard`) that target persistent storage rather than the
//! working progress store. Keyed by (wizard id, instance id).

use async_trait::async_trait;

use crate::domain::foundation::{InstanceId, WizardId};
use crate::domain::instance::InstanceRecord;

use super::StoreError;

/// Port for durable instance persistence.
#[async_trait]
pub trait InstanceRepository: Send + Sync {
    /// Finds a stored record, or `None`.
    async fn find(
        &self,
        wizard_id: &WizardId,
        instance_id: InstanceId,
    ) -> Result<Option<InstanceRecord>, StoreError>;

    /// Stores a record, replacing any previous one for the same keys.
    async fn save(&self, record: &InstanceRecord) -> Result<(), StoreError>;

    /// Deletes a stored record. Returns true when a record was removed.
    async fn delete(
        &self,
        wizard_id: &WizardId,
        instance_id: InstanceId,
    ) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn InstanceRepository) {}
}
