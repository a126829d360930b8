//! Step module - definitions, lookups, and processing hooks.

mod definition;
pub mod finder;
mod handler;
mod wizard;

pub use definition::{SkipRule, StepDataMap, StepDefinition, StepDefinitionBuilder};
pub use handler::{NoopStepHandler, StepContext, StepHandler};
pub use wizard::WizardDefinition;
