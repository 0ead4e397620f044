//! Event type definitions for the automation event system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason the event bus is shutting down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShutdownReason {
    /// The owning service is stopping normally.
    ServiceStopping,
    /// Shutdown forced by an error.
    Error(String),
}

/// Events emitted by the discovery and execution agents.
///
/// Delivery is best-effort: a slow or absent subscriber never blocks
/// automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AutomationEvent {
    /// A discovery session opened a browser on the entry URL.
    DiscoveryStarted {
        session_id: String,
        url: String,
        timestamp: DateTime<Utc>,
    },
    /// A page was recorded and the partial artifact refreshed.
    PageSaved {
        session_id: String,
        page_number: u32,
        total_pages_discovered: usize,
        timestamp: DateTime<Utc>,
    },
    /// A discovery session promoted its partial to a final structure.
    DiscoveryCompleted {
        session_id: String,
        wizard_id: String,
        total_pages: u32,
        timestamp: DateTime<Utc>,
    },
    /// The reaper destroyed an idle discovery session.
    SessionReaped {
        session_id: String,
        idle_secs: u64,
        timestamp: DateTime<Utc>,
    },
    /// An execution request passed validation and launched a browser.
    ExecutionStarted {
        wizard_id: String,
        timestamp: DateTime<Utc>,
    },
    /// One wizard page was replayed (fields filled, continue clicked).
    PageReplayed {
        wizard_id: String,
        page_number: u32,
        timestamp: DateTime<Utc>,
    },
    /// An execution request finished with the given outcome status.
    ExecutionCompleted {
        wizard_id: String,
        status: String,
        elapsed_ms: u64,
        timestamp: DateTime<Utc>,
    },
    /// Signals that the event bus is shutting down.
    ///
    /// Subscribers should exit their event loops when receiving this.
    Shutdown {
        reason: ShutdownReason,
        timestamp: DateTime<Utc>,
    },
}

impl AutomationEvent {
    /// Short label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AutomationEvent::DiscoveryStarted { .. } => "discovery_started",
            AutomationEvent::PageSaved { .. } => "page_saved",
            AutomationEvent::DiscoveryCompleted { .. } => "discovery_completed",
            AutomationEvent::SessionReaped { .. } => "session_reaped",
            AutomationEvent::ExecutionStarted { .. } => "execution_started",
            AutomationEvent::PageReplayed { .. } => "page_replayed",
            AutomationEvent::ExecutionCompleted { .. } => "execution_completed",
            AutomationEvent::Shutdown { .. } => "shutdown",
        }
    }
}
