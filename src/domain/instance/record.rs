//! InstanceRecord - the backend-agnostic persisted layout.
//!
//! This is the single source of truth a store holds for one instance.
//! Progress snapshots are always derived from it, never persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{
    InstanceId, InstanceStatus, OwnerId, StepId, Timestamp, WizardId,
};

/// Serialized form of one wizard instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub wizard_id: WizardId,
    pub instance_id: InstanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<OwnerId>,
    pub current_step_id: Option<StepId>,
    pub completed_steps: Vec<StepId>,
    pub step_data: HashMap<StepId, Value>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    pub status: InstanceStatus,
    pub started_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<Timestamp>,
}
