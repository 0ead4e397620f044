//! Action request and batch report types
//!
//! `ActionRequest` is the wire shape the external driver sends to
//! `execute_actions`; the tag names match the recorded `interaction`
//! values in wizard structures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::wizard::Interaction;

/// One requested browser action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    /// Clear then write a value into a visible text/number input.
    Fill { selector: String, value: String },
    /// Fill a typeahead, wait for suggestions, press Enter.
    FillEnter { selector: String, value: String },
    /// Native click on a visible button/link/label.
    Click { selector: String },
    /// DOM click via JS; works on hidden inputs.
    JavascriptClick { selector: String },
    /// Set a native select by option value or label.
    Select { selector: String, value: String },
}

impl ActionRequest {
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            ActionRequest::Fill { selector, .. }
            | ActionRequest::FillEnter { selector, .. }
            | ActionRequest::Click { selector }
            | ActionRequest::JavascriptClick { selector }
            | ActionRequest::Select { selector, .. } => selector,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            ActionRequest::Fill { value, .. }
            | ActionRequest::FillEnter { value, .. }
            | ActionRequest::Select { value, .. } => Some(value),
            ActionRequest::Click { .. } | ActionRequest::JavascriptClick { .. } => None,
        }
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        match self {
            ActionRequest::Fill { .. } => Interaction::Fill,
            ActionRequest::FillEnter { .. } => Interaction::FillEnter,
            ActionRequest::Click { .. } => Interaction::Click,
            ActionRequest::JavascriptClick { .. } => Interaction::JavascriptClick,
            ActionRequest::Select { .. } => Interaction::Select,
        }
    }
}

/// The action at which a batch halted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FailedAction {
    /// 0-based position in the request.
    pub index: usize,
    pub selector: String,
    pub error: String,
}

/// Progress report for one batch: `{completed, total, failed?}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchReport {
    pub completed: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_action: Option<FailedAction>,
}
