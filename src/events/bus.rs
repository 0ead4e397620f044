//! Broadcast event bus
//!
//! Thin wrapper over `tokio::sync::broadcast` with best-effort delivery
//! and publish/drop counters. Publishing never blocks and never fails
//! the operation that emitted the event.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::trace;

use super::types::{AutomationEvent, ShutdownReason};

/// Default channel capacity: enough for a burst of per-page events from
/// several concurrent sessions.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

#[derive(Debug)]
pub struct AutomationEventBus {
    sender: broadcast::Sender<AutomationEvent>,
    published: AtomicU64,
    dropped: AtomicU64,
}

impl Default for AutomationEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl AutomationEventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Subscribe to all subsequent events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AutomationEvent> {
        self.sender.subscribe()
    }

    /// Publish best-effort. Returns whether any subscriber received it;
    /// an event with no listeners counts as dropped, not as an error.
    pub fn publish(&self, event: AutomationEvent) -> bool {
        trace!(event = event.label(), "publishing automation event");
        match self.sender.send(event) {
            Ok(_) => {
                self.published.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Publish the shutdown marker; subscribers exit their loops on it.
    pub fn shutdown(&self, reason: ShutdownReason) {
        self.publish(AutomationEvent::Shutdown {
            reason,
            timestamp: Utc::now(),
        });
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
