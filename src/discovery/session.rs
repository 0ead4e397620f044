//! Discovery session state
//!
//! One live browser per session plus the page log recorded so far.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::browser::BrowserDriver;
use crate::error::WizardError;
use crate::wizard::{ClickSpec, WizardPage, WizardStructure};

use super::pages::PageLog;

#[derive(Debug)]
pub struct DiscoverySession {
    session_id: String,
    /// Taken on close; a session whose browser is gone rejects operations.
    driver: Option<BrowserDriver>,
    pages: PageLog,
    created_at: DateTime<Utc>,
    last_activity: Instant,
}

impl DiscoverySession {
    #[must_use]
    pub fn new(driver: BrowserDriver, start_url: String) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            driver: Some(driver),
            pages: PageLog::new(start_url),
            created_at: Utc::now(),
            last_activity: Instant::now(),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn driver(&self) -> Result<&BrowserDriver, WizardError> {
        self.driver.as_ref().ok_or_else(|| {
            WizardError::BrowserCrash("session browser already released".to_string())
        })
    }

    /// Mark activity; called on every tool call carrying this session id.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    #[must_use]
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Record a discovered page, overwriting any earlier save for the
    /// same page number. Returns the total distinct pages discovered.
    pub fn record_page(&mut self, page: WizardPage) -> usize {
        debug!(
            session_id = self.session_id,
            page_number = page.page_number,
            fields = page.fields.len(),
            "recording page metadata"
        );
        self.pages.record(page)
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.count()
    }

    /// Assemble the final structure from recorded pages.
    #[must_use]
    pub fn assemble(
        &self,
        wizard_id: &str,
        name: &str,
        start_action: Option<ClickSpec>,
    ) -> WizardStructure {
        self.pages.assemble(wizard_id, name, start_action)
    }

    /// Best-effort structure for the in-flight partial artifact.
    #[must_use]
    pub fn assemble_partial(&self) -> WizardStructure {
        self.pages.assemble_partial(&self.session_id)
    }

    /// Release the browser. Further driver operations fail.
    pub async fn close(&mut self) -> Result<(), WizardError> {
        if let Some(driver) = self.driver.take() {
            driver.close().await?;
        }
        Ok(())
    }
}
