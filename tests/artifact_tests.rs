//! Tests for the incremental artifact writer and the page log

use formwizard::discovery::PageLog;
use formwizard::{ArtifactStore, validate_structure};
use tempfile::TempDir;

mod common;
use common::{continue_button, sample_structure, text_field};

#[tokio::test]
async fn partial_is_written_and_replaced() {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());
    let session_id = "11112222-3333-4444-5555-666677778888";

    let mut log = PageLog::new("https://example.gov/wizard");
    let source = sample_structure();

    log.record(source.pages[0].clone());
    let path = artifacts
        .write_partial(session_id, &log.assemble_partial(session_id))
        .await
        .unwrap();
    assert!(path.exists());
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        format!("_partial_{session_id}.json")
    );

    let first: serde_json::Value =
        serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
    assert_eq!(first["total_pages"], 1);
    assert_eq!(first["name"], "[IN PROGRESS]");
    assert_eq!(first["wizard_id"], "partial-11112222");

    log.record(source.pages[1].clone());
    artifacts
        .write_partial(session_id, &log.assemble_partial(session_id))
        .await
        .unwrap();
    let second: serde_json::Value =
        serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
    assert_eq!(second["total_pages"], 2);
}

#[tokio::test]
async fn remove_partial_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());
    let session_id = "feedc0de-0000-0000-0000-000000000000";

    let log = PageLog::new("https://example.gov/wizard");
    artifacts
        .write_partial(session_id, &log.assemble_partial(session_id))
        .await
        .unwrap();

    artifacts.remove_partial(session_id).await.unwrap();
    assert!(!artifacts.partial_path(session_id).exists());
    // Removing again is not an error.
    artifacts.remove_partial(session_id).await.unwrap();
}

#[test]
fn later_saves_for_a_page_number_overwrite() {
    // Save-and-complete law: k saves then completion yields the
    // last-seen value of each page number.
    let source = sample_structure();
    let mut log = PageLog::new(&source.url);

    log.record(source.pages[0].clone());
    log.record(source.pages[1].clone());

    let mut revised = source.pages[1].clone();
    revised.fields.push(text_field("parent_assets", "#ParentAssets", true));
    assert_eq!(log.record(revised.clone()), 2);

    log.record(source.pages[2].clone());

    let assembled = log.assemble("fsa-estimator", "FSA Estimator", source.start_action.clone());
    assert_eq!(assembled.total_pages, 3);
    assert_eq!(assembled.pages[1], revised);

    // Validator idempotence: the assembled structure is complete.
    let report = validate_structure(&assembled);
    assert!(report.is_complete, "{:?}", report.warnings);
}

#[test]
fn pages_assemble_in_number_order_regardless_of_save_order() {
    let source = sample_structure();
    let mut log = PageLog::new(&source.url);

    log.record(source.pages[2].clone());
    log.record(source.pages[0].clone());
    log.record(source.pages[1].clone());

    let assembled = log.assemble("fsa-estimator", "FSA Estimator", None);
    let numbers: Vec<u32> = assembled.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn final_write_round_trips_through_validation() {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());

    let structure = sample_structure();
    artifacts.write_final(&structure).await.unwrap();

    let loaded = artifacts.read_final("fsa-estimator").await.unwrap();
    assert_eq!(loaded, structure);

    // A freshly written final file validates with zero warnings.
    let report = validate_structure(&loaded);
    assert!(report.is_complete);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn atomic_write_leaves_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());
    artifacts.write_final(&sample_structure()).await.unwrap();

    let structures_dir = dir.path().join("structure-schemas");
    let mut entries = tokio::fs::read_dir(&structures_dir).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, vec!["fsa-estimator.json"]);
}

#[test]
fn partial_id_is_a_valid_slug() {
    // The placeholder id must itself satisfy the wizard-id regex so
    // partial files never trip slug validation during recovery.
    let log = PageLog::new("https://example.gov");
    let partial = log.assemble_partial("abcd1234-ffff-0000-aaaa-999988887777");
    assert_eq!(partial.wizard_id, "partial-abcd1234");
    assert!(formwizard::utils::is_valid_wizard_id(&partial.wizard_id));
}

#[test]
fn empty_log_assembles_zero_pages() {
    let log = PageLog::new("https://example.gov");
    assert!(log.is_empty());
    let structure = log.assemble("empty-wizard", "Empty", None);
    assert_eq!(structure.total_pages, 0);
    assert!(!validate_structure(&structure).is_complete);
}

#[tokio::test]
async fn complete_removes_partial_while_keeping_final() {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());
    let session_id = "0a0a0a0a-1111-2222-3333-444455556666";

    let source = sample_structure();
    let mut log = PageLog::new(&source.url);
    for page in &source.pages {
        log.record(page.clone());
    }
    artifacts
        .write_partial(session_id, &log.assemble_partial(session_id))
        .await
        .unwrap();

    // Promote: final written, partial deleted.
    let final_structure = log.assemble("fsa-estimator", "FSA Estimator", Some(continue_button()));
    artifacts.write_final(&final_structure).await.unwrap();
    artifacts.remove_partial(session_id).await.unwrap();

    assert!(!artifacts.partial_path(session_id).exists());
    assert!(artifacts.final_exists("fsa-estimator").await);
}
