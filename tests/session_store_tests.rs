//! Tests for the discovery session store (no-browser paths)

use std::time::Duration;

use formwizard::{SessionStore, WizardError};

#[tokio::test]
async fn unknown_session_id_is_expired_without_browser_action() {
    let store = SessionStore::new(Duration::from_secs(1800));
    let err = store.lookup("no-such-session").await.unwrap_err();
    match err {
        WizardError::SessionExpired { session_id } => {
            assert_eq!(session_id, "no-such-session");
        }
        other => panic!("expected session_expired, got {other:?}"),
    }
}

#[tokio::test]
async fn destroying_an_unknown_session_reports_false() {
    let store = SessionStore::new(Duration::from_secs(1800));
    assert!(!store.destroy("missing").await);
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn shutdown_is_safe_on_an_empty_store() {
    let store = SessionStore::new(Duration::from_secs(1));
    store.start_reaper().await;
    // Starting twice is a no-op.
    store.start_reaper().await;
    store.shutdown().await;
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn error_kind_is_stable_for_the_wire() {
    let store = SessionStore::new(Duration::from_secs(1800));
    let err = store.lookup("gone").await.unwrap_err();
    assert_eq!(err.kind(), "session_expired");
}
