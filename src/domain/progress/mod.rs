//! Progress module - derived completion summaries.
//!
//! A snapshot is recomputed on every read from the persisted completed
//! list; it is never stored itself.

use serde::Serialize;

use crate::domain::foundation::{Percentage, StepId};
use crate::domain::instance::WizardInstance;
use crate::domain::step::WizardDefinition;

/// Read-only summary of one instance's completion state.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub total_steps: usize,
    pub completed_count: usize,
    /// 1-based ordinal of the cursor step, or 0 when there is none.
    pub current_step_position: usize,
    pub percent_complete: Percentage,
    pub remaining_step_ids: Vec<StepId>,
    pub is_complete: bool,
}

/// Derives progress snapshots from raw counts or a live instance.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Computes a snapshot from raw counts.
    ///
    /// `percent_complete` uses round-half-up semantics. Zero-step wizards
    /// are 0% and never complete.
    pub fn calculate(
        total_steps: usize,
        completed_count: usize,
        current_step_position: usize,
        remaining_step_ids: Vec<StepId>,
    ) -> ProgressSnapshot {
        let is_complete =
            total_steps > 0 && completed_count == total_steps && remaining_step_ids.is_empty();

        ProgressSnapshot {
            total_steps,
            completed_count,
            current_step_position,
            percent_complete: Percentage::of(completed_count, total_steps),
            remaining_step_ids,
            is_complete,
        }
    }

    /// Computes a snapshot for a live instance against its definition.
    ///
    /// Remaining steps are the uncompleted steps whose skip rule is
    /// currently false; steps the rule currently waves off count toward
    /// coverage, so an instance is complete once every non-skippable step
    /// at this data state has been completed.
    pub fn for_instance(
        definition: &WizardDefinition,
        instance: &WizardInstance,
    ) -> ProgressSnapshot {
        let total_steps = definition.len();
        let completed_count = instance.completed_count();

        let current_step_position = instance
            .current_step_id()
            .and_then(|id| definition.index_of(id))
            .map(|index| index + 1)
            .unwrap_or(0);

        let remaining_step_ids: Vec<StepId> = definition
            .steps()
            .iter()
            .filter(|step| {
                !instance.is_completed(step.id()) && !step.should_skip(instance.step_data())
            })
            .map(|step| step.id().clone())
            .collect();

        ProgressSnapshot {
            total_steps,
            completed_count,
            current_step_position,
            percent_complete: Percentage::of(completed_count, total_steps),
            is_complete: total_steps > 0 && remaining_step_ids.is_empty(),
            remaining_step_ids,
        }
    }
}
