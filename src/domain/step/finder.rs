//! StepFinder - pure lookups over an ordered step list.
//!
//! First match wins; a duplicate id in the supplied list is a
//! configuration error that [`WizardDefinition::new`] rejects up front.
//!
//! [`WizardDefinition::new`]: super::WizardDefinition::new

use crate::domain::foundation::StepId;

use super::StepDefinition;

/// Resolves a step id to its definition.
pub fn find<'a>(steps: &'a [StepDefinition], step_id: &StepId) -> Option<&'a StepDefinition> {
    steps.iter().find(|s| s.id() == step_id)
}

/// Resolves a step id to its ordinal position within the list.
pub fn index_of(steps: &[StepDefinition], step_id: &StepId) -> Option<usize> {
    steps.iter().position(|s| s.id() == step_id)
}
