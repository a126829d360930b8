//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `WAYPOINT` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use waypoint::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let engine = config.engine_config();
//! ```

mod error;
mod features;
mod navigation;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use navigation::NavigationSettings;
pub use storage::StorageConfig;

use serde::Deserialize;

use crate::application::EngineConfig;
use crate::domain::navigation::NavigationConfig;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Feature flags (jump navigation, event emission)
    #[serde(default)]
    pub features: FeatureFlags,

    /// Navigation item settings
    #[serde(default)]
    pub navigation: NavigationSettings,

    /// File-backed storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `WAYPOINT` prefix:
    ///
    /// - `WAYPOINT__FEATURES__ALLOW_JUMP_NAVIGATION=true`
    /// - `WAYPOINT__NAVIGATION__STEP_URL_PREFIX=/signup`
    /// - `WAYPOINT__STORAGE__DATA_DIR=/var/lib/waypoint`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WAYPOINT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.navigation.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Builds the explicit engine configuration value object the
    /// orchestrator and navigation engine take at construction.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            navigation: NavigationConfig {
                allow_jump_navigation: self.features.allow_jump_navigation,
                step_url_prefix: self.navigation.step_url_prefix.clone(),
            },
            emit_events: self.features.emit_events,
        }
    }
}
