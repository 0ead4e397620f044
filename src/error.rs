//! Error taxonomy for discovery and execution
//!
//! One variant per user-visible error kind. Primitives recover locally at
//! most once; the batch executor halts and reports; the execution pipeline
//! never re-plans on field-level errors.

use thiserror::Error;

/// Which layer of the timeout hierarchy expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutLayer {
    /// L1: page-default element operations (clicks, fills, waits).
    PageDefault,
    /// L2: navigations and inter-page transitions.
    Navigation,
    /// L3: the whole wizard replay.
    Execution,
}

impl TimeoutLayer {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeoutLayer::PageDefault => "l1",
            TimeoutLayer::Navigation => "l2",
            TimeoutLayer::Execution => "l3",
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("session expired or unknown: {session_id}")]
    SessionExpired { session_id: String },

    #[error("navigation failed for {url}: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("element not found: {selector} ({diagnostic})")]
    ElementNotFound {
        selector: String,
        alternatives_tried: Vec<String>,
        diagnostic: String,
    },

    #[error("element not interactable: {selector}: {reason}")]
    ElementNotInteractable { selector: String, reason: String },

    #[error("timeout_{} after {millis}ms during {operation}", layer.as_str())]
    Timeout {
        layer: TimeoutLayer,
        millis: u64,
        operation: String,
    },

    #[error("wizard not found: {wizard_id}")]
    WizardNotFound { wizard_id: String },

    #[error("wizard structure invalid: {}", warnings.join("; "))]
    StructureInvalid { warnings: Vec<String> },

    #[error("user-data schema invalid: {reason}")]
    SchemaInvalid { reason: String },

    #[error("browser crashed: {0}")]
    BrowserCrash(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WizardError {
    /// Stable wire identifier for the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WizardError::SessionExpired { .. } => "session_expired",
            WizardError::NavigationFailed { .. } => "navigation_failed",
            WizardError::ElementNotFound { .. } => "element_not_found",
            WizardError::ElementNotInteractable { .. } => "element_not_interactable",
            WizardError::Timeout { layer, .. } => match layer {
                TimeoutLayer::PageDefault => "timeout_l1",
                TimeoutLayer::Navigation => "timeout_l2",
                TimeoutLayer::Execution => "timeout_l3",
            },
            WizardError::WizardNotFound { .. } => "wizard_not_found",
            WizardError::StructureInvalid { .. } => "structure_invalid",
            WizardError::SchemaInvalid { .. } => "schema_invalid",
            WizardError::BrowserCrash(_) => "browser_crash",
            WizardError::Config(_) => "configuration_error",
            WizardError::Io(_) => "io_error",
            WizardError::Json(_) => "json_error",
            WizardError::Other(_) => "internal_error",
        }
    }
}
