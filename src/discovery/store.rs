//! Discovery session store
//!
//! The only process-wide mutable state: a map of live sessions plus a
//! low-frequency reaper that destroys idle ones and releases their
//! browsers. Mutations are confined to create/touch/destroy and the
//! reaper, serialized through the map lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::WizardError;
use crate::events::{AutomationEvent, AutomationEventBus};
use crate::utils::REAPER_INTERVAL;

use super::session::DiscoverySession;

pub type SharedSession = Arc<Mutex<DiscoverySession>>;

pub struct SessionStore {
    sessions: Mutex<HashMap<String, SharedSession>>,
    idle_timeout: Duration,
    reaper_handle: Mutex<Option<JoinHandle<()>>>,
    shutdown: AtomicBool,
    events: Option<Arc<AutomationEventBus>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Arc<Self> {
        Self::with_events(idle_timeout, None)
    }

    #[must_use]
    pub fn with_events(
        idle_timeout: Duration,
        events: Option<Arc<AutomationEventBus>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            reaper_handle: Mutex::new(None),
            shutdown: AtomicBool::new(false),
            events,
        })
    }

    /// Register a session, returning the shared handle.
    pub async fn create(&self, session: DiscoverySession) -> SharedSession {
        let session_id = session.session_id().to_string();
        let shared = Arc::new(Mutex::new(session));
        self.sessions
            .lock()
            .await
            .insert(session_id.clone(), shared.clone());
        info!(session_id, "discovery session created");
        shared
    }

    /// Resolve a session id, touching its activity clock.
    ///
    /// The store is authoritative: an unknown id is `session_expired`,
    /// whether it never existed or the reaper took it.
    pub async fn lookup(&self, session_id: &str) -> Result<SharedSession, WizardError> {
        let shared = {
            let sessions = self.sessions.lock().await;
            sessions.get(session_id).cloned()
        };
        match shared {
            Some(shared) => {
                shared.lock().await.touch();
                Ok(shared)
            }
            None => Err(WizardError::SessionExpired {
                session_id: session_id.to_string(),
            }),
        }
    }

    /// Remove a session and release its browser.
    pub async fn destroy(&self, session_id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(session_id);
        match removed {
            Some(shared) => {
                if let Err(e) = shared.lock().await.close().await {
                    warn!(session_id, error = %e, "browser release failed during destroy");
                }
                info!(session_id, "discovery session destroyed");
                true
            }
            None => false,
        }
    }

    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Start the background reaper. Idempotent.
    pub async fn start_reaper(self: &Arc<Self>) {
        let mut handle = self.reaper_handle.lock().await;
        if handle.is_some() {
            return;
        }
        let store = Arc::clone(self);
        *handle = Some(tokio::spawn(async move {
            reaper_loop(store).await;
        }));
    }

    /// Destroy every session and stop the reaper.
    pub async fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.reaper_handle.lock().await.take() {
            handle.abort();
        }
        let ids: Vec<String> = self.sessions.lock().await.keys().cloned().collect();
        for id in ids {
            self.destroy(&id).await;
        }
        info!("session store shutdown complete");
    }

    async fn reap_idle(&self) {
        let expired: Vec<(String, u64)> = {
            let sessions = self.sessions.lock().await;
            let mut expired = Vec::new();
            for (id, shared) in sessions.iter() {
                // A session busy in a long tool call holds its own lock;
                // try_lock skips it rather than stalling the reaper.
                if let Ok(session) = shared.try_lock()
                    && session.idle_for() > self.idle_timeout
                {
                    expired.push((id.clone(), session.idle_for().as_secs()));
                }
            }
            expired
        };
        for (id, idle_secs) in expired {
            warn!(session_id = id, idle_secs, "reaping idle discovery session");
            self.destroy(&id).await;
            if let Some(bus) = &self.events {
                bus.publish(AutomationEvent::SessionReaped {
                    session_id: id,
                    idle_secs,
                    timestamp: Utc::now(),
                });
            }
        }
    }
}

/// Background task: reap idle sessions at a low frequency.
async fn reaper_loop(store: Arc<SessionStore>) {
    let mut interval = tokio::time::interval(REAPER_INTERVAL);
    while !store.shutdown.load(Ordering::Relaxed) {
        interval.tick().await;
        store.reap_idle().await;
    }
    debug!("reaper loop exiting");
}
