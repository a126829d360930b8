//! NavigationItem - per-step view model for navigation queries.

use serde::Serialize;

use crate::domain::foundation::{StepId, StepStatus};

/// One entry per step definition, recomputed per navigation query.
///
/// Status derivation: the cursor step is in-progress; completed steps are
/// completed when their payload is present and skipped when it is not
/// (skip-completion stores no data); a completed step whose declared
/// dependencies are no longer all completed is invalid (possible under
/// jump navigation); otherwise a currently skip-eligible step is skipped
/// and everything else is pending.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationItem {
    pub step_id: StepId,
    pub title: String,
    pub position: usize,
    pub status: StepStatus,
    pub is_accessible: bool,
    pub is_optional: bool,
    pub url: String,
}
