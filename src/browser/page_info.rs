//! Structured page-element inventory
//!
//! Produces the interactive-element listing the external driver reads to
//! decide its next actions. Deliberately does not capture a screenshot;
//! callers reference the most recent capture of the same page.

use chromiumoxide::Page;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WizardError;

use super::js_scripts::FORM_INVENTORY_SCRIPT;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputInfo {
    pub input_type: String,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Associated label text (label[for], wrapping label, or aria-label).
    pub label: Option<String>,
    pub visible: bool,
    pub value: Option<String>,
    pub class_attr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectOptionInfo {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub visible: bool,
    /// Total option count; `options` holds at most the first 10.
    pub option_count: usize,
    pub options: Vec<SelectOptionInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextareaInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ButtonInfo {
    pub text: Option<String>,
    pub id: Option<String>,
    pub button_type: Option<String>,
    pub visible: bool,
}

/// Inventory of interactive elements on the current page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    pub inputs: Vec<InputInfo>,
    pub selects: Vec<SelectInfo>,
    pub textareas: Vec<TextareaInfo>,
    pub buttons: Vec<ButtonInfo>,
}

/// Extract the inventory from the live page.
pub async fn extract_page_info(page: &Page) -> Result<PageInfo, WizardError> {
    page.evaluate(FORM_INVENTORY_SCRIPT)
        .await
        .map_err(|e| WizardError::BrowserCrash(format!("page inventory failed: {e}")))?
        .into_value()
        .map_err(|e| WizardError::Other(anyhow::anyhow!("page inventory shape: {e}")))
}
