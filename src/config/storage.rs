//! Storage configuration section

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the file-backed progress store
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for persisted instance records
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "./data/wizards".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Validate the storage settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.is_empty() {
            return Err(ValidationError::invalid(
                "storage.data_dir",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_dir_validates() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, "./data/wizards");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let config = StorageConfig {
            data_dir: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
