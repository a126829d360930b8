//! ProgressStore port - keyed persistence for instance records.
//!
//! The engine only requires this get/put/update/forget contract; session,
//! cache, or relational backings are interchangeable implementations.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{InstanceId, WizardId};
use crate::domain::instance::InstanceRecord;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("No record stored under key: {0}")]
    NotFound(String),

    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize record: {0}")]
    DeserializationFailed(String),

    #[error("Invalid update path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Builds the store key for one instance of one wizard.
pub fn instance_key(wizard_id: &WizardId, instance_id: InstanceId) -> String {
    format!("wizard:{}:{}", wizard_id, instance_id)
}

/// Port for persisting and loading instance records.
///
/// A storage failure propagates immediately to the caller; the engine
/// performs no internal retry.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Stores the full record under a key, replacing any previous value.
    async fn put(&self, key: &str, record: &InstanceRecord) -> Result<(), StoreError>;

    /// Loads the record stored under a key, or `None`.
    async fn get(&self, key: &str) -> Result<Option<InstanceRecord>, StoreError>;

    /// Checks whether a record exists under a key.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Removes the record stored under a key, if any.
    async fn forget(&self, key: &str) -> Result<(), StoreError>;

    /// Surgically updates one field of the stored record by
    /// dot-separated path, e.g. `current_step_id` or `step_data.profile`.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` when no record exists under the key
    /// and `StoreError::InvalidPath` when the path cannot be applied.
    async fn update(&self, key: &str, dot_path: &str, value: Value) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_key_combines_wizard_and_instance() {
        let wizard_id = WizardId::new("onboarding").unwrap();
        let instance_id: InstanceId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();

        assert_eq!(
            instance_key(&wizard_id, instance_id),
            "wizard:onboarding:550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn store_error_not_found_names_the_key() {
        let err = StoreError::NotFound("wizard:onboarding:abc".to_string());
        assert!(err.to_string().contains("wizard:onboarding:abc"));
    }

    #[test]
    fn store_error_invalid_path_names_path_and_reason() {
        let err = StoreError::InvalidPath {
            path: "step_data..x".to_string(),
            reason: "empty segment".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("step_data..x"));
        assert!(msg.contains("empty segment"));
    }
}
