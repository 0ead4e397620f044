//! Tests for the progress event bus

use std::sync::Arc;
use std::time::Duration;

use formwizard::{AutomationEvent, AutomationEventBus, SessionStore, ShutdownReason};

#[tokio::test]
async fn subscribers_receive_published_events() {
    let bus = AutomationEventBus::new(16);
    let mut rx = bus.subscribe();

    assert!(bus.publish(AutomationEvent::ExecutionStarted {
        wizard_id: "fsa-estimator".to_string(),
        timestamp: chrono::Utc::now(),
    }));

    match rx.recv().await.unwrap() {
        AutomationEvent::ExecutionStarted { wizard_id, .. } => {
            assert_eq!(wizard_id, "fsa-estimator");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(bus.published_count(), 1);
    assert_eq!(bus.dropped_count(), 0);
}

#[tokio::test]
async fn publishing_without_subscribers_is_best_effort() {
    let bus = AutomationEventBus::new(16);
    assert!(!bus.publish(AutomationEvent::PageReplayed {
        wizard_id: "fsa-estimator".to_string(),
        page_number: 1,
        timestamp: chrono::Utc::now(),
    }));
    assert_eq!(bus.published_count(), 0);
    assert_eq!(bus.dropped_count(), 1);
}

#[tokio::test]
async fn shutdown_event_reaches_subscribers() {
    let bus = AutomationEventBus::new(16);
    let mut rx = bus.subscribe();

    bus.shutdown(ShutdownReason::ServiceStopping);

    match rx.recv().await.unwrap() {
        AutomationEvent::Shutdown { reason, .. } => {
            assert!(matches!(reason, ShutdownReason::ServiceStopping));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn event_labels_are_stable() {
    let event = AutomationEvent::PageSaved {
        session_id: "s".to_string(),
        page_number: 2,
        total_pages_discovered: 2,
        timestamp: chrono::Utc::now(),
    };
    assert_eq!(event.label(), "page_saved");
}

#[tokio::test]
async fn store_accepts_an_event_bus() {
    // Wiring smoke test: a store built with a bus still behaves normally
    // for the no-browser paths.
    let bus = Arc::new(AutomationEventBus::new(16));
    let store = SessionStore::with_events(Duration::from_secs(1800), Some(bus.clone()));
    assert_eq!(store.count().await, 0);
    assert!(store.lookup("nope").await.is_err());
    store.shutdown().await;
    // No sessions were reaped, so nothing was published.
    assert_eq!(bus.published_count() + bus.dropped_count(), 0);
}
