//! Instance module - the per-run aggregate, its persisted record, and
//! lifecycle events.

mod aggregate;
mod events;
mod record;

pub use aggregate::WizardInstance;
pub use events::WizardEvent;
pub use record::InstanceRecord;
