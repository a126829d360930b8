//! WizardDefinition - the configured, ordered step sequence.

use crate::domain::foundation::{StepId, ValidationError, WizardId};

use super::{finder, StepDefinition};

/// One wizard's identity plus its canonical step sequence.
///
/// Steps are stably sorted by their `order` value at construction, so the
/// original list position breaks ties and list index equals ordinal
/// position from then on.
#[derive(Debug, Clone)]
pub struct WizardDefinition {
    id: WizardId,
    steps: Vec<StepDefinition>,
}

impl WizardDefinition {
    /// Creates a definition, sorting steps and rejecting duplicate ids.
    pub fn new(id: WizardId, mut steps: Vec<StepDefinition>) -> Result<Self, ValidationError> {
        steps.sort_by_key(|s| s.order());

        for (i, step) in steps.iter().enumerate() {
            if steps[..i].iter().any(|other| other.id() == step.id()) {
                return Err(ValidationError::invalid_format(
                    "steps",
                    format!("duplicate step id '{}'", step.id()),
                ));
            }
        }

        Ok(Self { id, steps })
    }

    /// Returns the wizard id.
    pub fn id(&self) -> &WizardId {
        &self.id
    }

    /// Returns the steps in canonical order.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true for a zero-step wizard.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the first step in order, if any.
    pub fn first_step(&self) -> Option<&StepDefinition> {
        self.steps.first()
    }

    /// Resolves a step id to its definition.
    pub fn step(&self, step_id: &StepId) -> Option<&StepDefinition> {
        finder::find(&self.steps, step_id)
    }

    /// Resolves a step id to its ordinal position.
    pub fn index_of(&self, step_id: &StepId) -> Option<usize> {
        finder::index_of(&self.steps, step_id)
    }
}
