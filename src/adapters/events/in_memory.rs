//! In-Memory Notifier Adapter
//!
//! Records delivered events for inspection. Useful for testing and for
//! wiring the engine without a real event transport.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::instance::WizardEvent;
use crate::ports::Notifier;

/// Event sink that keeps everything it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    events: Arc<RwLock<Vec<WizardEvent>>>,
}

impl InMemoryNotifier {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all delivered events, in delivery order.
    pub async fn events(&self) -> Vec<WizardEvent> {
        self.events.read().await.clone()
    }

    /// Returns the delivered event type strings, in delivery order.
    pub async fn event_types(&self) -> Vec<&'static str> {
        self.events
            .read()
            .await
            .iter()
            .map(|e| e.event_type())
            .collect()
    }

    /// Drops all recorded events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, event: WizardEvent) {
        self.events.write().await.push(event);
    }
}
