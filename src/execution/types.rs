//! Execution request options and the tagged outcome union

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::Screenshot;
use crate::schema::{InvalidField, MissingField};
use crate::wizard::WizardSummary;

/// Structure summary plus the full user-data schema, the payload of
/// `get_wizard_info`. The schema is the contract an external driver
/// reads to ask the user for values.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WizardInfo {
    #[serde(flatten)]
    pub summary: WizardSummary,
    pub user_data_schema: Value,
}

/// Per-request options; everything else comes from the service config.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecutionOptions {
    /// Collect a screenshot per completed page plus the results page.
    #[serde(default = "default_true")]
    pub return_screenshots: bool,
    /// Override JPEG quality for this run (1-100).
    #[serde(default)]
    pub screenshot_quality: Option<u8>,
    /// Override the L3 replay timeout; must still satisfy L2 < L3 < L4.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            return_screenshots: true,
            screenshot_quality: None,
            timeout_seconds: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Outcome of one `execute_wizard` call.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success {
        wizard_id: String,
        pages_completed: u32,
        /// Extractor output for the results page.
        results: Value,
        /// Non-fatal problems (extraction failures and the like).
        warnings: Vec<String>,
        screenshots: Vec<Screenshot>,
        execution_time_ms: u64,
    },
    /// User-correctable: the data was rejected, either by the schema or
    /// by the wizard's own page-level validation.
    ValidationError {
        /// Page number when the wizard itself rejected the input.
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        messages: Vec<String>,
        /// Schema violations when validation failed before launch.
        invalid_fields: Vec<InvalidField>,
        #[serde(skip_serializing_if = "Option::is_none")]
        screenshot: Option<Screenshot>,
    },
    /// Required properties absent; no browser was launched.
    MissingData { missing: Vec<MissingField> },
    ExecutionError {
        kind: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        screenshot: Option<Screenshot>,
    },
}
