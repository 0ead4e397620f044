//! User-data schema loading and validation
//!
//! The paired schema is plain JSON Schema draft-07 with `type: object`.
//! Validation reports every problem at once: the external driver reads
//! the full report to ask the user for corrections in a single round,
//! so fail-fast would be actively harmful here.

use std::collections::HashMap;
use std::path::Path;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use schemars::JsonSchema as SchemarsSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::error::WizardError;
use crate::wizard::WizardStructure;

/// A required property absent from the user data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SchemarsSchema)]
pub struct MissingField {
    pub field_id: String,
    /// The schema property's `description`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// An example value from the schema (`examples[0]` or `default`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A present property that violates its type/pattern/enum constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SchemarsSchema)]
pub struct InvalidField {
    pub field_id: String,
    pub provided: Value,
    /// One-line explanation of the violation.
    pub message: String,
}

/// Outcome of validating one user-data object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, SchemarsSchema)]
pub struct DataReport {
    pub missing: Vec<MissingField>,
    pub invalid: Vec<InvalidField>,
}

impl DataReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// A loaded, compile-checked user-data schema.
#[derive(Debug, Clone)]
pub struct UserDataSchema {
    raw: Value,
}

impl UserDataSchema {
    /// Accept a schema value after checking it compiles as draft-07 and
    /// describes an object.
    pub fn from_value(raw: Value) -> Result<Self, WizardError> {
        if raw.get("type").and_then(Value::as_str) != Some("object") {
            return Err(WizardError::SchemaInvalid {
                reason: "user-data schema must declare type: object".to_string(),
            });
        }
        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&raw)
            .map_err(|e| WizardError::SchemaInvalid {
                reason: format!("schema does not compile as draft-07: {e}"),
            })?;
        Ok(Self { raw })
    }

    /// Load `wizards/data-schemas/<wizard_id>-schema.json`.
    pub async fn load(path: &Path) -> Result<Self, WizardError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            WizardError::SchemaInvalid {
                reason: format!("cannot read schema file {}: {e}", path.display()),
            }
        })?;
        let raw: Value = serde_json::from_str(&content).map_err(|e| WizardError::SchemaInvalid {
            reason: format!("schema file {} is not valid JSON: {e}", path.display()),
        })?;
        Self::from_value(raw)
    }

    /// The loaded schema, verbatim. This is the contract the external
    /// driver reads to ask the user for values.
    #[must_use]
    pub fn describe(&self) -> &Value {
        &self.raw
    }

    /// Property names listed in the schema's `required` array.
    #[must_use]
    pub fn required(&self) -> Vec<&str> {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The schema object for one property, if declared.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.raw.get("properties")?.get(name)
    }

    /// Documented `default` values per property, for the field resolver.
    /// The resolver never invents defaults; only these apply.
    #[must_use]
    pub fn defaults(&self) -> HashMap<String, Value> {
        let Some(props) = self.raw.get("properties").and_then(Value::as_object) else {
            return HashMap::new();
        };
        props
            .iter()
            .filter_map(|(name, prop)| {
                prop.get("default").map(|d| (name.clone(), d.clone()))
            })
            .collect()
    }

    /// Validate a user-data object, reporting every missing required
    /// property and every constraint violation.
    #[must_use]
    pub fn validate(&self, user_data: &Value) -> DataReport {
        let mut report = DataReport::default();

        for name in self.required() {
            if user_data.get(name).is_none() {
                report.missing.push(MissingField {
                    field_id: name.to_string(),
                    label: self
                        .property(name)
                        .and_then(|p| p.get("description"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    example: self.property(name).and_then(example_value),
                });
            }
        }

        let compiled = match JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&self.raw)
        {
            Ok(c) => c,
            Err(e) => {
                // from_value() already compile-checked; reaching this means
                // the raw value was mutated out from under us.
                report.invalid.push(InvalidField {
                    field_id: String::new(),
                    provided: Value::Null,
                    message: format!("schema no longer compiles: {e}"),
                });
                return report;
            }
        };

        if let Err(errors) = compiled.validate(user_data) {
            for err in errors {
                // Missing required properties are already reported above
                // with label/example context.
                if matches!(err.kind, ValidationErrorKind::Required { .. }) {
                    continue;
                }
                let field_id = err
                    .instance_path
                    .to_string()
                    .trim_start_matches('/')
                    .split('/')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                let provided = user_data.get(&field_id).cloned().unwrap_or(Value::Null);
                report.invalid.push(InvalidField {
                    field_id,
                    provided,
                    message: err.to_string(),
                });
            }
        }

        debug!(
            missing = report.missing.len(),
            invalid = report.invalid.len(),
            "user data validated"
        );
        report
    }
}

fn example_value(prop: &Value) -> Option<String> {
    let candidate = prop
        .get("examples")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .or_else(|| prop.get("default"))?;
    Some(match candidate {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Cross-check a structure against its paired schema: every required
/// wizard field must be a required schema property and vice-versa.
#[must_use]
pub fn pairing_warnings(structure: &WizardStructure, schema: &UserDataSchema) -> Vec<String> {
    let mut warnings = Vec::new();
    let required_props: Vec<&str> = schema.required();

    for field_id in structure.required_field_ids() {
        if schema.property(field_id).is_none() {
            warnings.push(format!(
                "required wizard field '{field_id}' has no schema property"
            ));
        } else if !required_props.contains(&field_id) {
            warnings.push(format!(
                "required wizard field '{field_id}' is not in the schema's required list"
            ));
        }
    }

    for prop in required_props {
        match structure.find_field(prop) {
            None => warnings.push(format!(
                "schema requires '{prop}' but no wizard field carries that field_id"
            )),
            Some(field) if !field.required => warnings.push(format!(
                "schema requires '{prop}' but the wizard field is optional"
            )),
            Some(_) => {}
        }
    }

    warnings
}
