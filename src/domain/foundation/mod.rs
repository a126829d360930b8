//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Waypoint domain.

mod errors;
mod ids;
mod instance_status;
mod percentage;
mod step_status;
mod timestamp;

pub use errors::{ValidationError, ValidationErrors, WizardError};
pub use ids::{InstanceId, OwnerId, StepId, WizardId};
pub use instance_status::InstanceStatus;
pub use percentage::Percentage;
pub use step_status::StepStatus;
pub use timestamp::Timestamp;
