//! Tests for the wizard catalog: availability gating and round-trips

use formwizard::{ArtifactStore, WizardCatalog, WizardError};
use tempfile::TempDir;

mod common;
use common::{sample_schema, sample_structure};

async fn seeded_catalog() -> (TempDir, WizardCatalog, ArtifactStore) {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());
    let catalog = WizardCatalog::new(dir.path());
    (dir, catalog, artifacts)
}

#[tokio::test]
async fn empty_directory_lists_nothing() {
    let (_dir, catalog, _artifacts) = seeded_catalog().await;
    assert!(catalog.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn valid_pair_is_listed_and_loadable() {
    let (_dir, catalog, artifacts) = seeded_catalog().await;
    let structure = sample_structure();
    artifacts.write_final(&structure).await.unwrap();
    artifacts
        .write_schema(&structure.wizard_id, &sample_schema())
        .await
        .unwrap();

    let listed = catalog.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].wizard_id, "fsa-estimator");
    assert_eq!(listed[0].total_pages, 3);
    assert!(listed[0].required_fields.contains(&"birth_year".to_string()));

    let (loaded, schema) = catalog.load("fsa-estimator").await.unwrap();
    assert_eq!(loaded, structure);
    assert_eq!(schema.describe(), &sample_schema());
}

#[tokio::test]
async fn structure_without_schema_is_unavailable() {
    let (_dir, catalog, artifacts) = seeded_catalog().await;
    artifacts.write_final(&sample_structure()).await.unwrap();

    assert!(catalog.list().await.unwrap().is_empty());
    let err = catalog.load("fsa-estimator").await.unwrap_err();
    assert!(matches!(err, WizardError::WizardNotFound { .. }));
}

#[tokio::test]
async fn invalid_structure_is_unavailable() {
    let (_dir, catalog, artifacts) = seeded_catalog().await;
    let mut structure = sample_structure();
    structure.total_pages = 9;
    artifacts.write_final(&structure).await.unwrap();
    artifacts
        .write_schema(&structure.wizard_id, &sample_schema())
        .await
        .unwrap();

    assert!(catalog.list().await.unwrap().is_empty());
    assert!(matches!(
        catalog.load("fsa-estimator").await.unwrap_err(),
        WizardError::WizardNotFound { .. }
    ));
}

#[tokio::test]
async fn mismatched_pairing_is_unavailable() {
    let (_dir, catalog, artifacts) = seeded_catalog().await;
    let structure = sample_structure();
    artifacts.write_final(&structure).await.unwrap();

    let mut schema = sample_schema();
    schema["required"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!("grade_level"));
    schema["properties"]["grade_level"] = serde_json::json!({ "type": "string" });
    artifacts
        .write_schema(&structure.wizard_id, &schema)
        .await
        .unwrap();

    assert!(catalog.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_wizard_is_not_found() {
    let (_dir, catalog, _artifacts) = seeded_catalog().await;
    let err = catalog.load("does-not-exist").await.unwrap_err();
    match err {
        WizardError::WizardNotFound { wizard_id } => assert_eq!(wizard_id, "does-not-exist"),
        other => panic!("expected wizard_not_found, got {other:?}"),
    }
}

#[tokio::test]
async fn listing_equals_valid_pairs_exactly() {
    // Catalog round-trip law: list() is exactly the set of ids with a
    // valid structure and a valid schema on disk.
    let (_dir, catalog, artifacts) = seeded_catalog().await;

    // One valid pair.
    let good = sample_structure();
    artifacts.write_final(&good).await.unwrap();
    artifacts
        .write_schema(&good.wizard_id, &sample_schema())
        .await
        .unwrap();

    // A second structure with no schema.
    let mut orphan = sample_structure();
    orphan.wizard_id = "orphan-wizard".to_string();
    artifacts.write_final(&orphan).await.unwrap();

    // A broken JSON file alongside them.
    let broken = artifacts.wizards_dir().join("structure-schemas/broken.json");
    tokio::fs::write(&broken, b"{ not json").await.unwrap();

    let listed = catalog.list().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|s| s.wizard_id.as_str()).collect();
    assert_eq!(ids, vec!["fsa-estimator"]);
}
