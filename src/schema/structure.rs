//! Universal wizard-structure validation
//!
//! Every discovered structure is checked against a fixed meta-schema plus
//! the invariants JSON Schema cannot express: contiguous page numbers,
//! continue buttons on non-terminal pages, and wizard-wide `field_id`
//! uniqueness. Runs at discovery completion and on catalog load.

use std::collections::HashSet;
use std::sync::LazyLock;

use jsonschema::{Draft, JSONSchema};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::utils::is_valid_wizard_id;
use crate::wizard::WizardStructure;

/// Fixed meta-schema shipped with the crate.
pub const META_SCHEMA_SOURCE: &str = include_str!("../../schemas/wizard-structure-v1.schema.json");

static META_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(META_SCHEMA_SOURCE)
        .unwrap_or_else(|e| panic!("bundled meta-schema is valid JSON: {e}"))
});

/// Validation outcome for a wizard structure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StructureReport {
    /// True when the structure passed the meta-schema and every invariant.
    pub is_complete: bool,
    /// True when the meta-schema itself passed (all required fields and
    /// enumerations present).
    pub has_required_fields: bool,
    pub warnings: Vec<String>,
}

impl StructureReport {
    fn ok() -> Self {
        Self {
            is_complete: true,
            has_required_fields: true,
            warnings: Vec::new(),
        }
    }
}

/// Validate a structure against the meta-schema and the §invariants.
#[must_use]
pub fn validate_structure(structure: &WizardStructure) -> StructureReport {
    let mut report = StructureReport::ok();

    let value = match serde_json::to_value(structure) {
        Ok(v) => v,
        Err(e) => {
            report.is_complete = false;
            report.has_required_fields = false;
            report.warnings.push(format!("structure not serializable: {e}"));
            return report;
        }
    };
    report.warnings.extend(meta_schema_warnings(&value));
    report.has_required_fields = report.warnings.is_empty();

    // Invariants beyond the meta-schema.
    if !is_valid_wizard_id(&structure.wizard_id) {
        report
            .warnings
            .push(format!("wizard_id '{}' is not a valid slug", structure.wizard_id));
    }

    if structure.total_pages as usize != structure.pages.len() {
        report.warnings.push(format!(
            "total_pages is {} but {} pages are present",
            structure.total_pages,
            structure.pages.len()
        ));
    }

    for (idx, page) in structure.pages.iter().enumerate() {
        let expected = idx as u32 + 1;
        if page.page_number != expected {
            report.warnings.push(format!(
                "page numbers must be contiguous from 1: position {} holds page_number {}",
                idx + 1,
                page.page_number
            ));
        }
    }

    if let Some((terminal, rest)) = structure.pages.split_last() {
        for page in rest {
            if page.continue_button.is_none() {
                report.warnings.push(format!(
                    "page {} is non-terminal but has no continue_button",
                    page.page_number
                ));
            }
        }
        debug!(
            terminal_page = terminal.page_number,
            has_continue = terminal.continue_button.is_some(),
            "terminal page checked"
        );
    } else {
        report.warnings.push("structure has no pages".to_string());
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for field in structure.all_fields() {
        if !seen.insert(field.field_id.as_str()) {
            report
                .warnings
                .push(format!("duplicate field_id '{}'", field.field_id));
        }
        if field.field_type != crate::wizard::FieldType::Group && field.selector.is_none() {
            report
                .warnings
                .push(format!("field '{}' has no selector", field.field_id));
        }
    }

    report.is_complete = report.warnings.is_empty();
    report
}

fn meta_schema_warnings(value: &Value) -> Vec<String> {
    let compiled = match JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&META_SCHEMA)
    {
        Ok(c) => c,
        Err(e) => return vec![format!("meta-schema failed to compile: {e}")],
    };
    match compiled.validate(value) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect(),
    }
}
