//! Event sink adapters implementing the Notifier port.

mod in_memory;
mod tracing_notifier;

pub use in_memory::InMemoryNotifier;
pub use tracing_notifier::TracingNotifier;
