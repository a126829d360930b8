//! NavigationEngine - reachability and skip-aware traversal.
//!
//! Pure queries over the configured step sequence and a read-only view of
//! one instance. Skip rules are re-evaluated on every scan; nothing here
//! caches across calls because the data map may change between them.

use crate::domain::foundation::{StepId, StepStatus};
use crate::domain::instance::WizardInstance;
use crate::domain::step::{finder, StepDefinition};

use super::NavigationItem;

/// Navigation behavior toggles, passed in explicitly rather than read
/// from ambient global state.
#[derive(Debug, Clone)]
pub struct NavigationConfig {
    /// When true, every known step is reachable regardless of order,
    /// dependencies, or completion state.
    pub allow_jump_navigation: bool,
    /// Prefix for generated per-step urls, e.g. "/wizard".
    pub step_url_prefix: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            allow_jump_navigation: false,
            step_url_prefix: "/wizard".to_string(),
        }
    }
}

/// Query engine over one wizard's ordered step list.
#[derive(Debug)]
pub struct NavigationEngine<'a> {
    steps: &'a [StepDefinition],
    config: &'a NavigationConfig,
}

impl<'a> NavigationEngine<'a> {
    /// Creates an engine over a pre-sorted step list.
    pub fn new(steps: &'a [StepDefinition], config: &'a NavigationConfig) -> Self {
        Self { steps, config }
    }

    /// Decides whether a step may currently be navigated to.
    ///
    /// Jump navigation short-circuits to reachable for any known id.
    /// Otherwise every declared dependency and every non-optional earlier
    /// step must be completed; optional-but-incomplete predecessors are
    /// skippable gates, not hard prerequisites.
    pub fn can_reach(&self, instance: &WizardInstance, step_id: &StepId) -> bool {
        let Some(index) = finder::index_of(self.steps, step_id) else {
            return false;
        };
        if self.config.allow_jump_navigation {
            return true;
        }

        let target = &self.steps[index];
        if target
            .dependencies()
            .iter()
            .any(|dep| !instance.is_completed(dep))
        {
            return false;
        }

        self.steps[..index]
            .iter()
            .all(|earlier| earlier.is_optional() || instance.is_completed(earlier.id()))
    }

    /// Finds the next non-skipped step after `from`.
    ///
    /// With no explicit origin the stored cursor is used; with no cursor
    /// either, the scan bootstraps from the start of the sequence. Returns
    /// `None` when the sequence is exhausted, which signals completion.
    pub fn next_step(
        &self,
        instance: &WizardInstance,
        from: Option<&StepId>,
    ) -> Option<&'a StepDefinition> {
        let origin = from.or_else(|| instance.current_step_id());
        let start = match origin {
            Some(step_id) => finder::index_of(self.steps, step_id)? + 1,
            None => 0,
        };

        self.steps[start.min(self.steps.len())..]
            .iter()
            .find(|step| !step.should_skip(instance.step_data()))
    }

    /// Finds the closest non-skipped step before `from`. Symmetric to
    /// [`next_step`](Self::next_step); returns `None` at the sequence
    /// start or when every earlier step is currently skip-eligible.
    pub fn previous_step(
        &self,
        instance: &WizardInstance,
        from: Option<&StepId>,
    ) -> Option<&'a StepDefinition> {
        let origin = from.or_else(|| instance.current_step_id())?;
        let index = finder::index_of(self.steps, origin)?;

        self.steps[..index]
            .iter()
            .rev()
            .find(|step| !step.should_skip(instance.step_data()))
    }

    /// Returns true if a previous non-skipped step exists.
    pub fn can_go_back(&self, instance: &WizardInstance) -> bool {
        self.previous_step(instance, None).is_some()
    }

    /// Returns true if a next non-skipped step exists.
    pub fn can_go_forward(&self, instance: &WizardInstance) -> bool {
        self.next_step(instance, None).is_some()
    }

    /// Builds the per-step view model list for the current state.
    pub fn items(&self, instance: &WizardInstance) -> Vec<NavigationItem> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| NavigationItem {
                step_id: step.id().clone(),
                title: step.title().to_string(),
                position: index + 1,
                status: self.status_of(instance, step),
                is_accessible: self.can_reach(instance, step.id()),
                is_optional: step.is_optional(),
                url: format!("{}/{}", self.config.step_url_prefix, step.id()),
            })
            .collect()
    }

    fn status_of(&self, instance: &WizardInstance, step: &StepDefinition) -> StepStatus {
        if instance.current_step_id() == Some(step.id()) && !instance.is_completed(step.id()) {
            return StepStatus::InProgress;
        }
        if instance.is_completed(step.id()) {
            if step
                .dependencies()
                .iter()
                .any(|dep| !instance.is_completed(dep))
            {
                return StepStatus::Invalid;
            }
            return if instance.data_for(step.id()).is_some() {
                StepStatus::Completed
            } else {
                StepStatus::Skipped
            };
        }
        if step.should_skip(instance.step_data()) {
            return StepStatus::Skipped;
        }
        StepStatus::Pending
    }
}
