//! StepHandler - per-step processing hooks.
//!
//! The orchestrator runs `before`, `process`, then `after` for the step
//! being submitted, between external validation and persistence. All three
//! default to no-ops so a wizard without custom processing registers
//! nothing.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{InstanceId, StepId, WizardError, WizardId};

/// Identifying context handed to every hook invocation.
#[derive(Debug, Clone)]
pub struct StepContext {
    pub wizard_id: WizardId,
    pub instance_id: InstanceId,
    pub step_id: StepId,
}

/// Processing hooks for one step.
///
/// `process` receives the externally-validated payload and returns the
/// value to persist; returning `WizardError::Validation` surfaces as a
/// failed step result with no state mutation.
#[async_trait]
pub trait StepHandler: Send + Sync {
    async fn before(&self, _ctx: &StepContext) -> Result<(), WizardError> {
        Ok(())
    }

    async fn process(&self, _ctx: &StepContext, data: Value) -> Result<Value, WizardError> {
        Ok(data)
    }

    async fn after(&self, _ctx: &StepContext, _data: &Value) -> Result<(), WizardError> {
        Ok(())
    }
}

/// Pass-through handler used when a step registers no hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStepHandler;

#[async_trait]
impl StepHandler for NoopStepHandler {}
