//! StepDefinition - immutable descriptor of one wizard step.
//!
//! A definition carries identity, canonical position, optionality, and the
//! tagged behavior objects (skip rule, dependency list) that the navigation
//! engine consults on every traversal.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::StepId;

/// Accumulated validated step data for one instance, keyed by step id.
pub type StepDataMap = HashMap<StepId, Value>;

/// Strategy object deciding whether a step is skipped for the current data.
///
/// Implementations must be side-effect-free and deterministic: the rule is
/// re-evaluated on every traversal and the result is never cached, because
/// the data map may have changed between calls.
pub trait SkipRule: Send + Sync {
    fn should_skip(&self, data: &StepDataMap) -> bool;
}

impl<F> SkipRule for F
where
    F: Fn(&StepDataMap) -> bool + Send + Sync,
{
    fn should_skip(&self, data: &StepDataMap) -> bool {
        self(data)
    }
}

/// The default rule: never skip.
fn never_skip(_data: &StepDataMap) -> bool {
    false
}

/// Immutable descriptor of one step.
///
/// Created once at wizard configuration time via [`StepDefinition::builder`]
/// and never mutated afterwards. `is_optional` (does not block later steps)
/// and `can_skip` (may be completed without data) are independent flags.
#[derive(Clone)]
pub struct StepDefinition {
    id: StepId,
    title: String,
    order: i32,
    is_optional: bool,
    can_skip: bool,
    dependencies: Vec<StepId>,
    skip_rule: Arc<dyn SkipRule>,
}

impl StepDefinition {
    /// Starts building a definition with the required identity fields.
    pub fn builder(id: StepId, title: impl Into<String>, order: i32) -> StepDefinitionBuilder {
        StepDefinitionBuilder {
            id,
            title: title.into(),
            order,
            is_optional: false,
            can_skip: false,
            dependencies: Vec::new(),
            skip_rule: Arc::new(never_skip),
        }
    }

    /// Returns the step id.
    pub fn id(&self) -> &StepId {
        &self.id
    }

    /// Returns the human-readable title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the canonical order value.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Returns true if incomplete predecessors of this kind never block
    /// reachability of later steps.
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Returns true if the step may be completed without supplying data.
    pub fn can_skip(&self) -> bool {
        self.can_skip
    }

    /// Returns the ids that must be completed before this step is reachable.
    pub fn dependencies(&self) -> &[StepId] {
        &self.dependencies
    }

    /// Evaluates the skip rule against the current data map.
    pub fn should_skip(&self, data: &StepDataMap) -> bool {
        self.skip_rule.should_skip(data)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("order", &self.order)
            .field("is_optional", &self.is_optional)
            .field("can_skip", &self.can_skip)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Builder for [`StepDefinition`].
pub struct StepDefinitionBuilder {
    id: StepId,
    title: String,
    order: i32,
    is_optional: bool,
    can_skip: bool,
    dependencies: Vec<StepId>,
    skip_rule: Arc<dyn SkipRule>,
}

impl StepDefinitionBuilder {
    /// Marks the step optional: it never blocks later steps.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Allows the step to be completed without supplying data.
    pub fn skippable(mut self) -> Self {
        self.can_skip = true;
        self
    }

    /// Declares a dependency that must be completed first.
    pub fn depends_on(mut self, step_id: StepId) -> Self {
        self.dependencies.push(step_id);
        self
    }

    /// Attaches a skip rule strategy.
    pub fn skip_when(mut self, rule: impl SkipRule + 'static) -> Self {
        self.skip_rule = Arc::new(rule);
        self
    }

    /// Finalizes the definition.
    pub fn build(self) -> StepDefinition {
        StepDefinition {
            id: self.id,
            title: self.title,
            order: self.order,
            is_optional: self.is_optional,
            can_skip: self.can_skip,
            dependencies: self.dependencies,
            skip_rule: self.skip_rule,
        }
    }
}
