//! Tests for user-data schema validation and structure/schema pairing

use formwizard::{UserDataSchema, WizardError, pairing_warnings};
use serde_json::json;

mod common;
use common::{sample_schema, sample_structure, valid_user_data};

#[test]
fn valid_data_passes() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let report = schema.validate(&valid_user_data());
    assert!(report.is_valid(), "{report:?}");
}

#[test]
fn every_missing_required_field_is_reported() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let mut data = valid_user_data();
    data.as_object_mut().unwrap().remove("birth_year");
    data.as_object_mut().unwrap().remove("state");

    let report = schema.validate(&data);
    assert!(!report.is_valid());
    assert_eq!(report.missing.len(), 2, "not fail-fast: {report:?}");

    let year = report
        .missing
        .iter()
        .find(|m| m.field_id == "birth_year")
        .expect("birth_year reported");
    assert_eq!(year.label.as_deref(), Some("Birth year (four digits)"));
    assert_eq!(year.example.as_deref(), Some("2007"));
}

#[test]
fn missing_field_without_example_still_reports() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let mut data = valid_user_data();
    data.as_object_mut().unwrap().remove("state");

    let report = schema.validate(&data);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].field_id, "state");
    assert_eq!(
        report.missing[0].label.as_deref(),
        Some("State of legal residence")
    );
    assert_eq!(report.missing[0].example, None);
}

#[test]
fn pattern_violation_names_the_property_and_value() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let mut data = valid_user_data();
    data["birth_month"] = json!("13");

    let report = schema.validate(&data);
    assert!(report.missing.is_empty());
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].field_id, "birth_month");
    assert_eq!(report.invalid[0].provided, json!("13"));
    assert!(!report.invalid[0].message.is_empty());
}

#[test]
fn enum_violation_is_reported() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let mut data = valid_user_data();
    data["marital_status"] = json!("divorced");

    let report = schema.validate(&data);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].field_id, "marital_status");
}

#[test]
fn missing_and_invalid_report_together() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let mut data = valid_user_data();
    data.as_object_mut().unwrap().remove("birth_year");
    data["birth_month"] = json!("00");

    let report = schema.validate(&data);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.invalid.len(), 1);
}

#[test]
fn describe_returns_the_schema_verbatim() {
    let raw = sample_schema();
    let schema = UserDataSchema::from_value(raw.clone()).unwrap();
    assert_eq!(schema.describe(), &raw);
}

#[test]
fn documented_defaults_are_exposed() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let defaults = schema.defaults();
    assert_eq!(defaults.get("birth_month"), Some(&json!("01")));
    assert_eq!(defaults.get("birth_day"), Some(&json!("01")));
    assert!(!defaults.contains_key("birth_year"));
}

#[test]
fn non_object_schema_is_rejected() {
    let err = UserDataSchema::from_value(json!({ "type": "array" })).unwrap_err();
    assert!(matches!(err, WizardError::SchemaInvalid { .. }));
}

#[test]
fn malformed_schema_is_rejected_at_compile() {
    let err = UserDataSchema::from_value(json!({
        "type": "object",
        "properties": { "x": { "pattern": "[unclosed" } }
    }))
    .unwrap_err();
    assert!(matches!(err, WizardError::SchemaInvalid { .. }));
}

#[test]
fn consistent_pairing_has_no_warnings() {
    let schema = UserDataSchema::from_value(sample_schema()).unwrap();
    let warnings = pairing_warnings(&sample_structure(), &schema);
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn required_wizard_field_missing_from_schema_warns() {
    let mut schema_value = sample_schema();
    schema_value["properties"]
        .as_object_mut()
        .unwrap()
        .remove("marital_status");
    schema_value["required"]
        .as_array_mut()
        .unwrap()
        .retain(|v| v != "marital_status");

    let schema = UserDataSchema::from_value(schema_value).unwrap();
    let warnings = pairing_warnings(&sample_structure(), &schema);
    assert!(
        warnings
            .iter()
            .any(|w| w.contains("marital_status") && w.contains("no schema property")),
        "{warnings:?}"
    );
}

#[test]
fn schema_required_without_wizard_field_warns() {
    let mut schema_value = sample_schema();
    schema_value["properties"]["grade_level"] = json!({ "type": "string" });
    schema_value["required"]
        .as_array_mut()
        .unwrap()
        .push(json!("grade_level"));

    let schema = UserDataSchema::from_value(schema_value).unwrap();
    let warnings = pairing_warnings(&sample_structure(), &schema);
    assert!(
        warnings
            .iter()
            .any(|w| w.contains("grade_level") && w.contains("no wizard field")),
        "{warnings:?}"
    );
}

#[test]
fn optional_wizard_field_required_by_schema_warns() {
    let mut schema_value = sample_schema();
    // student_assets is optional in the structure.
    schema_value["required"]
        .as_array_mut()
        .unwrap()
        .push(json!("student_assets"));

    let schema = UserDataSchema::from_value(schema_value).unwrap();
    let warnings = pairing_warnings(&sample_structure(), &schema);
    assert!(
        warnings
            .iter()
            .any(|w| w.contains("student_assets") && w.contains("optional")),
        "{warnings:?}"
    );
}
