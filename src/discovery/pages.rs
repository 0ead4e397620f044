//! Accumulated page log for a discovery session
//!
//! Pages are keyed by page number; saving the same number again
//! overwrites the earlier record, so completion assembles the last-seen
//! value of each page.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::utils::DISCOVERY_VERSION;
use crate::wizard::{ClickSpec, WizardPage, WizardStructure};

#[derive(Debug, Clone)]
pub struct PageLog {
    start_url: String,
    pages: BTreeMap<u32, WizardPage>,
}

impl PageLog {
    #[must_use]
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            pages: BTreeMap::new(),
        }
    }

    /// Record a page, overwriting any earlier save for the same number.
    /// Returns the total distinct pages discovered.
    pub fn record(&mut self, page: WizardPage) -> usize {
        self.pages.insert(page.page_number, page);
        self.pages.len()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Assemble a structure from the recorded pages, in page-number order.
    #[must_use]
    pub fn assemble(
        &self,
        wizard_id: &str,
        name: &str,
        start_action: Option<ClickSpec>,
    ) -> WizardStructure {
        let pages: Vec<WizardPage> = self.pages.values().cloned().collect();
        WizardStructure {
            wizard_id: wizard_id.to_string(),
            name: name.to_string(),
            url: self.start_url.clone(),
            discovered_at: Utc::now(),
            discovery_version: DISCOVERY_VERSION.to_string(),
            total_pages: pages.len() as u32,
            start_action,
            pages,
        }
    }

    /// Best-effort structure for the in-flight partial artifact.
    #[must_use]
    pub fn assemble_partial(&self, session_id: &str) -> WizardStructure {
        let prefix: String = session_id.chars().take(8).collect();
        let mut structure = self.assemble(&format!("partial-{prefix}"), "", None);
        structure.name = "[IN PROGRESS]".to_string();
        structure
    }
}
