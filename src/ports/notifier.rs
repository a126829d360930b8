//! Notifier port - fire-and-forget lifecycle notifications.
//!
//! The engine emits events through this sink without knowing the
//! transport. Delivery is best-effort: the engine never blocks on or
//! inspects the outcome, so adapters swallow and log their own failures.

use async_trait::async_trait;

use crate::domain::instance::WizardEvent;

/// Port for publishing lifecycle events.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one event, best-effort.
    async fn notify(&self, event: WizardEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Notifier) {}
}
