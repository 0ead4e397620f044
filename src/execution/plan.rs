//! Field resolver
//!
//! Joins validated user data onto the wizard structure by `field_id` and
//! emits an ordered plan. The resolver dispatches the interaction the
//! structure recorded; it never re-selects primitives, and it never
//! invents defaults — only schema-documented `default` values apply.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::WizardError;
use crate::wizard::{ClickSpec, Field, Interaction, WizardStructure};

/// One resolved action against one leaf field.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEntry {
    pub field_id: String,
    pub selector: String,
    pub alternatives: Vec<String>,
    pub interaction: Interaction,
    /// Present for value-bearing primitives (fill, fill_enter, select).
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlannedPage {
    pub page_number: u32,
    pub page_title: String,
    pub entries: Vec<PlannedEntry>,
    pub continue_button: Option<ClickSpec>,
}

#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub pages: Vec<PlannedPage>,
}

impl ExecutionPlan {
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.pages.iter().map(|p| p.entries.len()).sum()
    }
}

/// Build the replay plan for validated user data.
///
/// `defaults` are the schema-documented per-property defaults (e.g. an
/// unspecified month defaulting to "01" when only a year is required).
pub fn build_plan(
    structure: &WizardStructure,
    user_data: &Value,
    defaults: &HashMap<String, Value>,
) -> Result<ExecutionPlan, WizardError> {
    let mut pages = Vec::with_capacity(structure.pages.len());

    for page in &structure.pages {
        let mut entries = Vec::new();
        for field in &page.fields {
            match &field.sub_fields {
                Some(subs) => {
                    let group_value = user_data.get(&field.field_id);
                    for sub in subs {
                        if let Some(entry) = resolve_leaf(sub, user_data, group_value, defaults)? {
                            entries.push(entry);
                        }
                    }
                }
                None => {
                    if let Some(entry) = resolve_leaf(field, user_data, None, defaults)? {
                        entries.push(entry);
                    }
                }
            }
        }
        pages.push(PlannedPage {
            page_number: page.page_number,
            page_title: page.page_title.clone(),
            entries,
            continue_button: page.continue_button.clone(),
        });
    }

    let plan = ExecutionPlan { pages };
    debug!(
        pages = plan.pages.len(),
        entries = plan.total_entries(),
        "execution plan built"
    );
    Ok(plan)
}

/// Resolve one leaf field to a planned entry, or `None` when an optional
/// field has no value and no documented default.
fn resolve_leaf(
    field: &Field,
    user_data: &Value,
    group_value: Option<&Value>,
    defaults: &HashMap<String, Value>,
) -> Result<Option<PlannedEntry>, WizardError> {
    // Lookup order: the leaf's own property, then a member of the
    // enclosing group object, then the schema default.
    let raw = user_data
        .get(&field.field_id)
        .or_else(|| group_value.and_then(|g| g.get(&field.field_id)))
        .or_else(|| defaults.get(&field.field_id));

    let Some(raw) = raw else {
        if field.required {
            // Validation runs before planning, so this is a pairing bug
            // between structure and schema rather than bad user input.
            return Err(WizardError::SchemaInvalid {
                reason: format!(
                    "required field '{}' survived validation without a value",
                    field.field_id
                ),
            });
        }
        return Ok(None);
    };

    let value = stringify(raw);
    let selector = field
        .selector
        .as_deref()
        .ok_or_else(|| WizardError::StructureInvalid {
            warnings: vec![format!("leaf field '{}' has no selector", field.field_id)],
        })?;

    let (selector, value) = match field.interaction {
        // Click targets encode the chosen option in the selector; the
        // {value}/{Value} tokens let one recorded selector cover every
        // option of a radio group.
        Interaction::Click | Interaction::JavascriptClick => {
            (substitute_value(selector, &value), None)
        }
        Interaction::Fill | Interaction::FillEnter | Interaction::Select => {
            (selector.to_string(), Some(value))
        }
    };

    Ok(Some(PlannedEntry {
        field_id: field.field_id.clone(),
        selector,
        alternatives: field.selector_alternatives.clone().unwrap_or_default(),
        interaction: field.interaction,
        value,
    }))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace `{value}` with the value verbatim and `{Value}` with its
/// first-letter-uppercased form.
fn substitute_value(selector: &str, value: &str) -> String {
    if !selector.contains('{') {
        return selector.to_string();
    }
    let capitalized = {
        let mut chars = value.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    };
    selector
        .replace("{value}", value)
        .replace("{Value}", &capitalized)
}

#[cfg(test)]
mod tests {
    use super::substitute_value;

    #[test]
    fn plain_selectors_pass_through() {
        assert_eq!(substitute_value("#Continue", "x"), "#Continue");
    }

    #[test]
    fn value_tokens_substitute() {
        assert_eq!(
            substitute_value("#Radio_MaritalStatus{Value}", "unmarried"),
            "#Radio_MaritalStatusUnmarried"
        );
        assert_eq!(
            substitute_value("input[value=\"{value}\"]", "freshman"),
            "input[value=\"freshman\"]"
        );
    }
}
