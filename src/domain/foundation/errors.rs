//! Error types for the domain layer.

use std::collections::BTreeMap;
use thiserror::Error;

use super::{InstanceId, StepId, WizardId};
use crate::ports::StoreError;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Structured per-field validation failures for one step payload.
///
/// Maps field name to the list of messages raised against it. Ordered by
/// field name so error output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Returns true if no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields with failures.
    pub fn field_count(&self) -> usize {
        self.0.len()
    }

    /// Returns the messages recorded against a field, if any.
    pub fn messages_for(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    /// Iterates over (field, messages) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The engine's error taxonomy.
///
/// Validation and invalid-step failures are recoverable (callers retry
/// with corrected input or another target). NotInitialized is a
/// precondition violation on the calling path. Storage failures propagate
/// unchanged from the collaborator, never retried here.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid step '{step_id}' for wizard '{wizard_id}': {reason}")]
    InvalidStep {
        wizard_id: WizardId,
        step_id: StepId,
        reason: String,
    },

    #[error("No instance '{instance_id}' found for wizard '{wizard_id}'")]
    NotFound {
        wizard_id: WizardId,
        instance_id: InstanceId,
    },

    #[error("Wizard '{wizard_id}' used before initialize for instance '{instance_id}'")]
    NotInitialized {
        wizard_id: WizardId,
        instance_id: InstanceId,
    },

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl WizardError {
    /// Creates an invalid-step error with context.
    pub fn invalid_step(
        wizard_id: &WizardId,
        step_id: &StepId,
        reason: impl Into<String>,
    ) -> Self {
        WizardError::InvalidStep {
            wizard_id: wizard_id.clone(),
            step_id: step_id.clone(),
            reason: reason.into(),
        }
    }

    /// Returns true when the caller can retry with corrected input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WizardError::Validation(_) | WizardError::InvalidStep { .. } | WizardError::NotFound { .. }
        )
    }
}
