//! Tests for wizard-structure validation (meta-schema + invariants)

use formwizard::validate_structure;

mod common;
use common::{continue_button, sample_structure, text_field};

#[test]
fn sample_structure_is_complete() {
    let report = validate_structure(&sample_structure());
    assert!(report.has_required_fields, "{:?}", report.warnings);
    assert!(report.is_complete, "{:?}", report.warnings);
    assert!(report.warnings.is_empty());
}

#[test]
fn page_number_gap_is_flagged() {
    let mut structure = sample_structure();
    structure.pages[1].page_number = 5;
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("contiguous")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn total_pages_mismatch_is_flagged() {
    let mut structure = sample_structure();
    structure.total_pages = 7;
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report.warnings.iter().any(|w| w.contains("total_pages")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn missing_continue_button_on_non_terminal_page() {
    let mut structure = sample_structure();
    structure.pages[0].continue_button = None;
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("continue_button")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn terminal_page_needs_no_continue_button() {
    // The fixture's last page already omits it; adding one is also fine.
    let mut structure = sample_structure();
    structure.pages[2].continue_button = Some(continue_button());
    let report = validate_structure(&structure);
    assert!(report.is_complete, "{:?}", report.warnings);
}

#[test]
fn duplicate_field_ids_across_pages_are_flagged() {
    let mut structure = sample_structure();
    structure.pages[1]
        .fields
        .push(text_field("parent_income", "#ParentIncomeDup", false));
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("duplicate field_id 'parent_income'")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn duplicate_sub_field_id_is_flagged() {
    let mut structure = sample_structure();
    // A top-level field shadowing a group member.
    structure.pages[1]
        .fields
        .push(text_field("birth_year", "#AnotherYear", false));
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("duplicate field_id 'birth_year'")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn leaf_without_selector_is_flagged() {
    let mut structure = sample_structure();
    structure.pages[1].fields[0].selector = None;
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report.warnings.iter().any(|w| w.contains("no selector")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn bad_wizard_id_slug_is_flagged() {
    let mut structure = sample_structure();
    structure.wizard_id = "FSA Estimator!".to_string();
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(
        report.warnings.iter().any(|w| w.contains("slug")),
        "{:?}",
        report.warnings
    );
}

#[test]
fn empty_structure_is_rejected() {
    let mut structure = sample_structure();
    structure.pages.clear();
    structure.total_pages = 0;
    let report = validate_structure(&structure);
    assert!(!report.is_complete);
    assert!(!report.has_required_fields);
}
