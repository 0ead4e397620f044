//! Result extraction
//!
//! Per-wizard extractors registered by `wizard_id`, with a default that
//! returns the visible text of the results region. Extraction failures
//! are warnings on the success payload, never run failures.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Value, json};

use crate::browser::BrowserDriver;
use crate::browser::js_scripts::region_text_script;
use crate::error::WizardError;

/// Pluggable hook for reading the results page of one wizard.
pub trait ResultExtractor: Send + Sync {
    fn extract<'a>(
        &'a self,
        driver: &'a BrowserDriver,
    ) -> BoxFuture<'a, Result<Value, WizardError>>;
}

/// Default extractor: visible text of a results region, falling back to
/// the page body when the region selector matches nothing.
pub struct RegionTextExtractor {
    selector: String,
}

impl RegionTextExtractor {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

impl Default for RegionTextExtractor {
    fn default() -> Self {
        Self::new("#results, .results, main")
    }
}

impl ResultExtractor for RegionTextExtractor {
    fn extract<'a>(
        &'a self,
        driver: &'a BrowserDriver,
    ) -> BoxFuture<'a, Result<Value, WizardError>> {
        Box::pin(async move {
            let text = driver
                .evaluate(&region_text_script(&self.selector))
                .await?;
            Ok(json!({ "results_text": text.as_str().unwrap_or_default() }))
        })
    }
}

/// Registry of extractors keyed by wizard id.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn ResultExtractor>>,
    default_extractor: Arc<dyn ResultExtractor>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self {
            extractors: HashMap::new(),
            default_extractor: Arc::new(RegionTextExtractor::default()),
        }
    }
}

impl ExtractorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wizard-specific extractor.
    pub fn register(&mut self, wizard_id: impl Into<String>, extractor: Arc<dyn ResultExtractor>) {
        self.extractors.insert(wizard_id.into(), extractor);
    }

    #[must_use]
    pub fn get(&self, wizard_id: &str) -> Arc<dyn ResultExtractor> {
        self.extractors
            .get(wizard_id)
            .cloned()
            .unwrap_or_else(|| self.default_extractor.clone())
    }
}
