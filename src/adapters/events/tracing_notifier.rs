//! Tracing Notifier Adapter
//!
//! Writes every lifecycle event to the structured log. Useful as the
//! default sink when no event transport is wired, and as a companion
//! sink during development.

use async_trait::async_trait;

use crate::domain::instance::WizardEvent;
use crate::ports::Notifier;

/// Event sink that logs events via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Create a new logging sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, event: WizardEvent) {
        tracing::info!(
            event_type = event.event_type(),
            wizard_id = %event.wizard_id(),
            instance_id = %event.instance_id(),
            payload = %event.payload(),
            "wizard lifecycle event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{InstanceId, Timestamp, WizardId};

    #[tokio::test]
    async fn notify_does_not_panic() {
        let notifier = TracingNotifier::new();
        notifier
            .notify(WizardEvent::Started {
                wizard_id: WizardId::new("onboarding").unwrap(),
                instance_id: InstanceId::new(),
                started_at: Timestamp::now(),
            })
            .await;
    }
}
