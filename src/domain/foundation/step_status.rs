//! StepStatus enum for per-step navigation state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of one step as seen by navigation queries.
///
/// Derived per query from the instance's completed set, cursor, and the
/// step's current skip-rule result; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
    Invalid,
}

impl StepStatus {
    /// Returns true if the step counts toward completion.
    pub fn is_complete(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Skipped)
    }

    /// Returns true if the step is the active cursor position.
    pub fn is_active(&self) -> bool {
        matches!(self, StepStatus::InProgress)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in-progress",
            StepStatus::Completed => "completed",
            StepStatus::Skipped => "skipped",
            StepStatus::Invalid => "invalid",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_and_skipped_count_as_complete() {
        assert!(StepStatus::Completed.is_complete());
        assert!(StepStatus::Skipped.is_complete());
        assert!(!StepStatus::Pending.is_complete());
        assert!(!StepStatus::InProgress.is_complete());
        assert!(!StepStatus::Invalid.is_complete());
    }

    #[test]
    fn only_in_progress_is_active() {
        assert!(StepStatus::InProgress.is_active());
        assert!(!StepStatus::Completed.is_active());
        assert!(!StepStatus::Pending.is_active());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn displays_kebab_case() {
        assert_eq!(format!("{}", StepStatus::InProgress), "in-progress");
        assert_eq!(format!("{}", StepStatus::Pending), "pending");
    }
}
