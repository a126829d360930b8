//! Lifecycle events emitted by the orchestrator.
//!
//! Events are fire-and-forget messages handed to the injected `Notifier`
//! sink; the engine never blocks on or inspects delivery. Event type
//! strings carry an explicit version suffix.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{InstanceId, Percentage, StepId, Timestamp, WizardId};

/// A lifecycle notification with its payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    Started {
        wizard_id: WizardId,
        instance_id: InstanceId,
        started_at: Timestamp,
    },
    StepCompleted {
        wizard_id: WizardId,
        instance_id: InstanceId,
        step_id: StepId,
        percent_complete: Percentage,
        completed_at: Timestamp,
    },
    StepSkipped {
        wizard_id: WizardId,
        instance_id: InstanceId,
        step_id: StepId,
        skipped_at: Timestamp,
    },
    Completed {
        wizard_id: WizardId,
        instance_id: InstanceId,
        completed_at: Timestamp,
    },
}

impl WizardEvent {
    /// Returns the versioned event type string, used for routing.
    pub fn event_type(&self) -> &'static str {
        match self {
            WizardEvent::Started { .. } => "wizard.started.v1",
            WizardEvent::StepCompleted { .. } => "step.completed.v1",
            WizardEvent::StepSkipped { .. } => "step.skipped.v1",
            WizardEvent::Completed { .. } => "wizard.completed.v1",
        }
    }

    /// Returns the wizard this event belongs to.
    pub fn wizard_id(&self) -> &WizardId {
        match self {
            WizardEvent::Started { wizard_id, .. }
            | WizardEvent::StepCompleted { wizard_id, .. }
            | WizardEvent::StepSkipped { wizard_id, .. }
            | WizardEvent::Completed { wizard_id, .. } => wizard_id,
        }
    }

    /// Returns the instance this event belongs to.
    pub fn instance_id(&self) -> InstanceId {
        match self {
            WizardEvent::Started { instance_id, .. }
            | WizardEvent::StepCompleted { instance_id, .. }
            | WizardEvent::StepSkipped { instance_id, .. }
            | WizardEvent::Completed { instance_id, .. } => *instance_id,
        }
    }

    /// Serializes the event payload for transport.
    pub fn payload(&self) -> Value {
        serde_json::to_value(self)
            .expect("Event serialization should never fail for well-formed events")
    }
}
