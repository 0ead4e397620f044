//! Shared fixtures: a representative student-aid estimator wizard with a
//! hidden-radio page, a typeahead state picker, and a birth-date group.
#![allow(dead_code)]

use formwizard::{
    ClickSpec, Field, FieldType, Interaction, SelectorType, WizardPage, WizardStructure,
};
use serde_json::{Value, json};

pub fn continue_button() -> ClickSpec {
    ClickSpec {
        selector: "#Continue".to_string(),
        selector_type: SelectorType::Css,
        label: Some("Continue".to_string()),
    }
}

pub fn text_field(field_id: &str, selector: &str, required: bool) -> Field {
    Field {
        label: field_id.replace('_', " "),
        field_id: field_id.to_string(),
        selector: Some(selector.to_string()),
        selector_alternatives: None,
        field_type: FieldType::Number,
        interaction: Interaction::Fill,
        required,
        example_value: Some("0".to_string()),
        notes: None,
        sub_fields: None,
    }
}

pub fn birth_date_group() -> Field {
    let sub = |field_id: &str, selector: &str| Field {
        label: field_id.replace('_', " "),
        field_id: field_id.to_string(),
        selector: Some(selector.to_string()),
        selector_alternatives: None,
        field_type: FieldType::Number,
        interaction: Interaction::Fill,
        required: true,
        example_value: Some("01".to_string()),
        notes: None,
        sub_fields: None,
    };
    Field {
        label: "Date of birth".to_string(),
        field_id: "birth_date".to_string(),
        selector: None,
        selector_alternatives: None,
        field_type: FieldType::Group,
        interaction: Interaction::Fill,
        required: true,
        example_value: None,
        notes: Some("month/day/year triple".to_string()),
        sub_fields: Some(vec![
            sub("birth_month", "#DateOfBirthMonth"),
            sub("birth_day", "#DateOfBirthDay"),
            sub("birth_year", "#DateOfBirthYear"),
        ]),
    }
}

pub fn marital_radio() -> Field {
    Field {
        label: "Marital status".to_string(),
        field_id: "marital_status".to_string(),
        selector: Some("#Radio_MaritalStatus{Value}".to_string()),
        selector_alternatives: Some(vec!["input[name=\"maritalStatus\"]".to_string()]),
        field_type: FieldType::Radio,
        interaction: Interaction::JavascriptClick,
        required: true,
        example_value: Some("unmarried".to_string()),
        notes: Some("radios hidden behind styled labels".to_string()),
        sub_fields: None,
    }
}

pub fn state_typeahead() -> Field {
    Field {
        label: "State of residence".to_string(),
        field_id: "state".to_string(),
        selector: Some("input[type=\"search\"]".to_string()),
        selector_alternatives: None,
        field_type: FieldType::Typeahead,
        interaction: Interaction::FillEnter,
        required: true,
        example_value: Some("Illinois".to_string()),
        notes: None,
        sub_fields: None,
    }
}

/// A three-page structure exercising groups, hidden radios, and
/// typeaheads, ending on a results page with no continue button.
pub fn sample_structure() -> WizardStructure {
    WizardStructure {
        wizard_id: "fsa-estimator".to_string(),
        name: "FSA Estimator".to_string(),
        url: "https://studentaid.example.gov/estimator".to_string(),
        discovered_at: chrono::Utc::now(),
        discovery_version: "0.3.0".to_string(),
        total_pages: 3,
        start_action: Some(ClickSpec {
            selector: "Start".to_string(),
            selector_type: SelectorType::Text,
            label: Some("Start button on the landing page".to_string()),
        }),
        pages: vec![
            WizardPage {
                page_number: 1,
                page_title: "About you".to_string(),
                url_pattern: "/estimator/student".to_string(),
                fields: vec![birth_date_group(), marital_radio(), state_typeahead()],
                continue_button: Some(continue_button()),
            },
            WizardPage {
                page_number: 2,
                page_title: "Finances".to_string(),
                url_pattern: "/estimator/finances".to_string(),
                fields: vec![
                    text_field("parent_income", "#ParentIncome", true),
                    text_field("student_income", "#StudentIncome", true),
                    text_field("student_assets", "#StudentAssets", false),
                ],
                continue_button: Some(continue_button()),
            },
            WizardPage {
                page_number: 3,
                page_title: "Your estimate".to_string(),
                url_pattern: "/estimator/results".to_string(),
                fields: vec![],
                continue_button: None,
            },
        ],
    }
}

/// The paired draft-07 user-data schema for `sample_structure`.
pub fn sample_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": [
            "birth_month", "birth_day", "birth_year",
            "marital_status", "state", "parent_income", "student_income"
        ],
        "properties": {
            "birth_month": {
                "type": "string",
                "pattern": "^(0[1-9]|1[0-2])$",
                "description": "Birth month (two digits)",
                "examples": ["05"],
                "default": "01"
            },
            "birth_day": {
                "type": "string",
                "pattern": "^(0[1-9]|[12][0-9]|3[01])$",
                "description": "Birth day (two digits)",
                "default": "01"
            },
            "birth_year": {
                "type": "string",
                "pattern": "^(19|20)[0-9]{2}$",
                "description": "Birth year (four digits)",
                "examples": ["2007"]
            },
            "marital_status": {
                "type": "string",
                "enum": ["unmarried", "married", "separated"],
                "description": "Student marital status"
            },
            "state": {
                "type": "string",
                "description": "State of legal residence"
            },
            "parent_income": {
                "type": "string",
                "description": "Parent adjusted gross income"
            },
            "student_income": {
                "type": "string",
                "description": "Student income"
            },
            "student_assets": {
                "type": "string",
                "description": "Student assets"
            }
        }
    })
}

/// Complete, valid user data for `sample_schema`.
pub fn valid_user_data() -> Value {
    json!({
        "birth_month": "05",
        "birth_day": "15",
        "birth_year": "2007",
        "marital_status": "unmarried",
        "state": "Illinois",
        "parent_income": "85000",
        "student_income": "0",
        "student_assets": "0"
    })
}
