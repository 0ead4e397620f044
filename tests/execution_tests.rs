//! Tests for the execution pipeline's pre-browser paths
//!
//! Everything here must resolve before a browser would launch: catalog
//! misses, schema validation failures, and per-request option overrides
//! that violate the timeout hierarchy.

use formwizard::{ArtifactStore, AutomationConfig, ExecutionOptions, ExecutionOutcome,
    ExecutionPipeline};
use serde_json::json;
use tempfile::TempDir;

mod common;
use common::{sample_schema, sample_structure, valid_user_data};

async fn seeded_pipeline() -> (TempDir, ExecutionPipeline) {
    let dir = TempDir::new().unwrap();
    let artifacts = ArtifactStore::new(dir.path());
    let structure = sample_structure();
    artifacts.write_final(&structure).await.unwrap();
    artifacts
        .write_schema(&structure.wizard_id, &sample_schema())
        .await
        .unwrap();

    let config = AutomationConfig::builder()
        .wizards_dir(dir.path())
        .build()
        .unwrap();
    (dir, ExecutionPipeline::new(config))
}

#[tokio::test]
async fn unknown_wizard_reports_wizard_not_found() {
    let (_dir, pipeline) = seeded_pipeline().await;
    let outcome = pipeline
        .execute_wizard("nope", &valid_user_data(), &ExecutionOptions::default())
        .await;
    match outcome {
        ExecutionOutcome::ExecutionError { kind, .. } => {
            assert_eq!(kind, "wizard_not_found");
        }
        other => panic!("expected execution_error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_required_field_short_circuits_without_browser() {
    let (_dir, pipeline) = seeded_pipeline().await;
    let mut data = valid_user_data();
    data.as_object_mut().unwrap().remove("birth_year");

    let outcome = pipeline
        .execute_wizard("fsa-estimator", &data, &ExecutionOptions::default())
        .await;
    match outcome {
        ExecutionOutcome::MissingData { missing } => {
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].field_id, "birth_year");
            assert_eq!(missing[0].label.as_deref(), Some("Birth year (four digits)"));
        }
        other => panic!("expected missing_data, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_field_reports_validation_error() {
    let (_dir, pipeline) = seeded_pipeline().await;
    let mut data = valid_user_data();
    data["birth_month"] = json!("13");

    let outcome = pipeline
        .execute_wizard("fsa-estimator", &data, &ExecutionOptions::default())
        .await;
    match outcome {
        ExecutionOutcome::ValidationError {
            page,
            invalid_fields,
            ..
        } => {
            assert_eq!(page, None);
            assert_eq!(invalid_fields.len(), 1);
            assert_eq!(invalid_fields[0].field_id, "birth_month");
        }
        other => panic!("expected validation_error, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_override_below_navigation_is_rejected() {
    // Default navigation timeout is 120s; a 30s replay budget breaks the
    // hierarchy and must be refused before any partial run begins.
    let (_dir, pipeline) = seeded_pipeline().await;
    let options = ExecutionOptions {
        timeout_seconds: Some(30),
        ..Default::default()
    };

    let outcome = pipeline
        .execute_wizard("fsa-estimator", &valid_user_data(), &options)
        .await;
    match outcome {
        ExecutionOutcome::ExecutionError { kind, message, .. } => {
            assert_eq!(kind, "configuration_error");
            assert!(message.contains("hierarchy"), "{message}");
        }
        other => panic!("expected execution_error, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_screenshot_quality_override_is_rejected() {
    let (_dir, pipeline) = seeded_pipeline().await;
    let options = ExecutionOptions {
        screenshot_quality: Some(0),
        ..Default::default()
    };

    let outcome = pipeline
        .execute_wizard("fsa-estimator", &valid_user_data(), &options)
        .await;
    assert!(matches!(
        outcome,
        ExecutionOutcome::ExecutionError { kind, .. } if kind == "configuration_error"
    ));
}

#[tokio::test]
async fn list_and_info_cover_the_catalog() {
    let (_dir, pipeline) = seeded_pipeline().await;

    let listed = pipeline.list_wizards().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].wizard_id, "fsa-estimator");

    let info = pipeline.get_wizard_info("fsa-estimator").await.unwrap();
    assert_eq!(info.summary.total_pages, 3);
    assert_eq!(info.user_data_schema, sample_schema());
    assert!(
        info.summary
            .required_fields
            .contains(&"marital_status".to_string())
    );

    assert!(pipeline.get_wizard_info("missing").await.is_err());
}
