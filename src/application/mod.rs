//! Application layer - the orchestrator driving step processing.

mod orchestrator;

pub use orchestrator::{EngineConfig, StepResult, WizardOrchestrator};
