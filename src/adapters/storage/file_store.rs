//! File-based Progress Store Adapter
//!
//! Stores instance records as YAML documents on disk, one file per key.
//! Key segments (separated by `:`) become directory levels, so the
//! layout stays navigable: `<base>/wizard/onboarding/<instance>.yaml`.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::instance::InstanceRecord;
use crate::ports::{ProgressStore, StoreError};

use super::apply_dot_path;

/// File-backed storage for instance records.
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    base_path: PathBuf,
}

impl FileProgressStore {
    /// Create a new file store rooted at a base directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        let mut path = self.base_path.clone();
        for segment in key.split(':') {
            path.push(segment);
        }
        path.set_extension("yaml");
        path
    }

    async fn ensure_parent(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(())
    }

    async fn read_record(&self, key: &str) -> Result<Option<InstanceRecord>, StoreError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let record = serde_yaml::from_str(&yaml)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
        Ok(Some(record))
    }

    async fn write_record(&self, key: &str, record: &InstanceRecord) -> Result<(), StoreError> {
        let path = self.record_path(key);
        self.ensure_parent(&path).await?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        fs::write(&path, yaml)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl ProgressStore for FileProgressStore {
    async fn put(&self, key: &str, record: &InstanceRecord) -> Result<(), StoreError> {
        self.write_record(key, record).await
    }

    async fn get(&self, key: &str) -> Result<Option<InstanceRecord>, StoreError> {
        self.read_record(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.record_path(key).exists())
    }

    async fn forget(&self, key: &str) -> Result<(), StoreError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn update(&self, key: &str, dot_path: &str, value: Value) -> Result<(), StoreError> {
        let record = self
            .read_record(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let mut doc = serde_json::to_value(&record)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        apply_dot_path(&mut doc, dot_path, value)?;

        let updated: InstanceRecord = serde_json::from_value(doc)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
        self.write_record(key, &updated).await
    }
}
