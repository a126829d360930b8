//! StepValidator port - external field-level validation.
//!
//! The engine never validates payload fields itself; it hands the raw
//! payload to this collaborator and persists whatever validated value
//! comes back.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{StepId, ValidationErrors};

/// Port for validating one step's raw payload.
#[async_trait]
pub trait StepValidator: Send + Sync {
    /// Returns the validated (possibly normalized) payload, or the
    /// structured per-field error set. A validation failure causes no
    /// state mutation in the engine.
    async fn validate(&self, step_id: &StepId, raw_data: &Value)
        -> Result<Value, ValidationErrors>;
}
