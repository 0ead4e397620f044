//! Tests for the validating configuration builder

use formwizard::{AutomationConfig, BrowserEngine, WizardError};
use std::time::Duration;

#[test]
fn defaults_satisfy_the_hierarchy() {
    let config = AutomationConfig::builder().build().unwrap();

    assert_eq!(config.engine(), BrowserEngine::Chromium);
    assert!(config.headless());
    assert_eq!(config.op_timeout(), Duration::from_millis(120_000));
    assert_eq!(config.navigation_timeout(), Duration::from_millis(120_000));
    assert_eq!(config.execution_timeout(), Duration::from_secs(180));
    assert_eq!(config.request_timeout(), Duration::from_secs(240));
    assert_eq!(config.screenshot_quality(), 60);
    assert_eq!(config.screenshot_max_bytes(), 50 * 1024);
    assert_eq!(config.idle_session_timeout(), Duration::from_secs(1800));
    assert!(!config.error_selectors().is_empty());
}

#[test]
fn builder_overrides_apply() {
    let config = AutomationConfig::builder()
        .headless(false)
        .viewport(1920, 1080)
        .slow_mo_ms(50)
        .navigation_timeout_ms(30_000)
        .execution_timeout_s(60)
        .request_timeout_s(90)
        .screenshot_quality(80)
        .screenshot_max_bytes(100_000)
        .wizards_dir("/tmp/wizards-test")
        .idle_session_timeout_s(600)
        .build()
        .unwrap();

    assert!(!config.headless());
    assert_eq!(config.viewport(), (1920, 1080));
    assert_eq!(config.slow_mo(), Duration::from_millis(50));
    assert_eq!(config.navigation_timeout(), Duration::from_millis(30_000));
    assert_eq!(config.execution_timeout(), Duration::from_secs(60));
    assert_eq!(config.wizards_dir(), std::path::Path::new("/tmp/wizards-test"));
    assert_eq!(config.idle_session_timeout(), Duration::from_secs(600));
}

#[test]
fn execution_below_navigation_is_rejected() {
    // 30s replay budget under a 60s navigation timeout can never hold.
    let result = AutomationConfig::builder()
        .navigation_timeout_ms(60_000)
        .execution_timeout_s(30)
        .build();

    match result {
        Err(WizardError::Config(msg)) => {
            assert!(msg.contains("hierarchy"), "unexpected message: {msg}");
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn execution_equal_to_navigation_is_rejected() {
    let result = AutomationConfig::builder()
        .navigation_timeout_ms(120_000)
        .execution_timeout_s(120)
        .build();
    assert!(matches!(result, Err(WizardError::Config(_))));
}

#[test]
fn request_must_exceed_execution() {
    let result = AutomationConfig::builder()
        .execution_timeout_s(180)
        .request_timeout_s(180)
        .build();
    assert!(matches!(result, Err(WizardError::Config(_))));
}

#[test]
fn zero_navigation_timeout_is_rejected() {
    let result = AutomationConfig::builder().navigation_timeout_ms(0).build();
    assert!(matches!(result, Err(WizardError::Config(_))));
}

#[test]
fn screenshot_quality_bounds() {
    assert!(
        AutomationConfig::builder()
            .screenshot_quality(0)
            .build()
            .is_err()
    );
    assert!(
        AutomationConfig::builder()
            .screenshot_quality(100)
            .build()
            .is_ok()
    );
}

#[test]
fn lowered_layers_pass_when_consistent() {
    // Matching a lowered L3 with lowered L1/L2 preserves the chain.
    let config = AutomationConfig::builder()
        .navigation_timeout_ms(20_000)
        .execution_timeout_s(30)
        .request_timeout_s(60)
        .build()
        .unwrap();
    assert_eq!(config.execution_timeout(), Duration::from_secs(30));
}
