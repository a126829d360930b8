//! InstanceStatus enum for wizard instance lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a wizard instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl InstanceStatus {
    /// Returns true if the instance accepts step transitions.
    pub fn is_mutable(&self) -> bool {
        matches!(self, InstanceStatus::InProgress)
    }

    /// Returns true if the instance reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstanceStatus::Completed | InstanceStatus::Abandoned)
    }
}

impl Default for InstanceStatus {
    fn default() -> Self {
        InstanceStatus::InProgress
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceStatus::InProgress => "in-progress",
            InstanceStatus::Completed => "completed",
            InstanceStatus::Abandoned => "abandoned",
        };
        write!(f, "{}", s)
    }
}
