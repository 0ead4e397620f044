//! Wizard structure data model
//!
//! The replay description produced by discovery and consumed by execution.
//! `field_id` is the join key between wizard fields and user-data schema
//! properties; it must be unique across the whole wizard, sub-fields
//! included.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a selector string should be resolved against the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectorType {
    /// Visible text of a clickable element (button, link, label).
    Text,
    /// An element id; resolved as `#id`.
    Id,
    /// A raw CSS selector.
    Css,
    /// Heuristic: CSS if it looks like one, id next, text last.
    #[default]
    Auto,
}

/// A recorded click target (start action, continue button).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClickSpec {
    pub selector: String,
    #[serde(default)]
    pub selector_type: SelectorType,
    /// Human-readable label, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// DOM construct category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Radio,
    Checkbox,
    Select,
    Typeahead,
    /// A labelled cluster of sub-fields (e.g. month/day/year triple).
    /// The group itself has no selector.
    Group,
}

/// The five action primitives. Recorded explicitly in the structure at
/// discovery time; execution dispatches on the recorded value and never
/// re-selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Fill,
    FillEnter,
    Click,
    JavascriptClick,
    Select,
}

/// One interactive field on a wizard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    /// Human-visible label, informational.
    pub label: String,
    /// Unique join key; must match a property name in the paired
    /// user-data schema.
    pub field_id: String,
    /// DOM locator. Absent only for groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Fallback locators, tried in order after `selector` fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_alternatives: Option<Vec<String>>,
    pub field_type: FieldType,
    pub interaction: Interaction,
    pub required: bool,
    /// Test value recorded during discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Present only when `field_type == Group`; sub-fields never nest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_fields: Option<Vec<Field>>,
}

impl Field {
    /// Leaf fields carrying a selector: the field itself, or its
    /// sub-fields when it is a group.
    pub fn leaves(&self) -> impl Iterator<Item = &Field> {
        let (own, subs): (Option<&Field>, &[Field]) = match &self.sub_fields {
            Some(subs) => (None, subs.as_slice()),
            None => (Some(self), &[]),
        };
        own.into_iter().chain(subs.iter())
    }
}

/// One page of the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WizardPage {
    /// 1-indexed, strictly sequential within a structure.
    pub page_number: u32,
    pub page_title: String,
    pub url_pattern: String,
    pub fields: Vec<Field>,
    /// Absent only on the terminal results page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_button: Option<ClickSpec>,
}

/// The replay description for one wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WizardStructure {
    /// Stable slug, `^[a-z0-9-]+$`.
    pub wizard_id: String,
    pub name: String,
    /// Entry URL.
    pub url: String,
    pub discovered_at: DateTime<Utc>,
    /// Version of the discovery code that produced this structure.
    pub discovery_version: String,
    /// Must equal `pages.len()`.
    pub total_pages: u32,
    /// How to enter the wizard from a landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_action: Option<ClickSpec>,
    pub pages: Vec<WizardPage>,
}

impl WizardStructure {
    /// All leaf fields of the wizard, in page order.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.pages
            .iter()
            .flat_map(|p| p.fields.iter())
            .flat_map(Field::leaves)
    }

    /// Field ids of every leaf field, in page order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.all_fields().map(|f| f.field_id.as_str())
    }

    /// Field ids of required leaf fields.
    pub fn required_field_ids(&self) -> impl Iterator<Item = &str> {
        self.all_fields()
            .filter(|f| f.required)
            .map(|f| f.field_id.as_str())
    }

    /// Look up a leaf field by id.
    #[must_use]
    pub fn find_field(&self, field_id: &str) -> Option<&Field> {
        self.all_fields().find(|f| f.field_id == field_id)
    }
}

/// Listing summary for the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WizardSummary {
    pub wizard_id: String,
    pub name: String,
    pub url: String,
    pub total_pages: u32,
    pub discovered_at: DateTime<Utc>,
    /// Field ids the paired schema marks as required.
    pub required_fields: Vec<String>,
}
