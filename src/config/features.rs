//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling engine behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Allow navigating to any known step regardless of order,
    /// dependencies, or completion state
    #[serde(default)]
    pub allow_jump_navigation: bool,

    /// Emit lifecycle events through the configured notifier
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
}

fn default_emit_events() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            allow_jump_navigation: false,
            emit_events: default_emit_events(),
        }
    }
}
