//! Atomic execution pipeline
//!
//! One `execute_wizard` call replays the whole wizard in one browser
//! lifetime under the L3 deadline. Validation happens before any browser
//! launches; the browser is released on every exit path; field-level
//! errors are surfaced, never re-planned.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::actions::run_primitive;
use crate::browser::{BrowserDriver, Screenshot, with_layer_timeout};
use crate::config::AutomationConfig;
use crate::error::{TimeoutLayer, WizardError};
use crate::events::AutomationEvent;
use crate::utils::NAVIGATION_BACKOFF;
use crate::wizard::{WizardCatalog, WizardStructure};

use super::extract::ExtractorRegistry;
use super::plan::{ExecutionPlan, build_plan};
use super::types::{ExecutionOptions, ExecutionOutcome, WizardInfo};

/// How long to wait for a load event after a continue click before
/// assuming a same-document transition. SPA wizards advance without
/// emitting navigation events.
const TRANSITION_SETTLE: Duration = Duration::from_secs(3);

/// Ceiling for best-effort failure screenshots; an expired L3 must not
/// stall teardown behind a slow capture.
const FAILURE_CAPTURE_LIMIT: Duration = Duration::from_secs(5);

struct ReplayOutput {
    results: Value,
    warnings: Vec<String>,
    screenshots: Vec<Screenshot>,
    /// Set when a wizard page rejected the input.
    page_validation: Option<(u32, Vec<String>, Option<Screenshot>)>,
}

/// Stateless executor: load, validate, plan, replay.
pub struct ExecutionPipeline {
    config: AutomationConfig,
    catalog: WizardCatalog,
    extractors: ExtractorRegistry,
}

impl ExecutionPipeline {
    #[must_use]
    pub fn new(config: AutomationConfig) -> Self {
        let catalog = WizardCatalog::new(config.wizards_dir());
        Self {
            config,
            catalog,
            extractors: ExtractorRegistry::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &WizardCatalog {
        &self.catalog
    }

    /// Register per-wizard result extractors.
    pub fn extractors_mut(&mut self) -> &mut ExtractorRegistry {
        &mut self.extractors
    }

    /// Summaries of every available wizard.
    pub async fn list_wizards(&self) -> Result<Vec<crate::wizard::WizardSummary>, WizardError> {
        self.catalog.list().await
    }

    /// Structure summary plus the full user-data schema for one wizard.
    pub async fn get_wizard_info(&self, wizard_id: &str) -> Result<WizardInfo, WizardError> {
        let (structure, schema) = self.catalog.load(wizard_id).await?;
        Ok(WizardInfo {
            summary: crate::wizard::WizardSummary {
                wizard_id: structure.wizard_id.clone(),
                name: structure.name.clone(),
                url: structure.url.clone(),
                total_pages: structure.total_pages,
                discovered_at: structure.discovered_at,
                required_fields: schema.required().iter().map(|s| s.to_string()).collect(),
            },
            user_data_schema: schema.describe().clone(),
        })
    }

    /// Replay a wizard with the given user data.
    pub async fn execute_wizard(
        &self,
        wizard_id: &str,
        user_data: &Value,
        options: &ExecutionOptions,
    ) -> ExecutionOutcome {
        let started = Instant::now();

        // 1. Load structure and schema; 2. validate. No browser yet.
        let (structure, schema) = match self.catalog.load(wizard_id).await {
            Ok(pair) => pair,
            Err(e) => {
                return ExecutionOutcome::ExecutionError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                    page: None,
                    screenshot: None,
                };
            }
        };

        let report = schema.validate(user_data);
        if !report.missing.is_empty() {
            return ExecutionOutcome::MissingData {
                missing: report.missing,
            };
        }
        if !report.invalid.is_empty() {
            let messages = report
                .invalid
                .iter()
                .map(|i| format!("{}: {}", i.field_id, i.message))
                .collect();
            return ExecutionOutcome::ValidationError {
                page: None,
                messages,
                invalid_fields: report.invalid,
                screenshot: None,
            };
        }

        // 3. Plan.
        let plan = match build_plan(&structure, user_data, &schema.defaults()) {
            Ok(plan) => plan,
            Err(e) => {
                return ExecutionOutcome::ExecutionError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                    page: None,
                    screenshot: None,
                };
            }
        };

        // Per-request overrides must still satisfy the hierarchy.
        let config = match self.effective_config(options) {
            Ok(config) => config,
            Err(e) => {
                return ExecutionOutcome::ExecutionError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                    page: None,
                    screenshot: None,
                };
            }
        };

        // 4-5. Enter the L3 scope and launch; release on every path.
        let driver = match BrowserDriver::launch(&config).await {
            Ok(driver) => driver,
            Err(e) => {
                return ExecutionOutcome::ExecutionError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                    page: None,
                    screenshot: None,
                };
            }
        };

        if let Some(bus) = self.config.event_bus() {
            bus.publish(AutomationEvent::ExecutionStarted {
                wizard_id: wizard_id.to_string(),
                timestamp: chrono::Utc::now(),
            });
        }

        let current_page = AtomicU32::new(0);
        let replay = self.run_replay(&driver, &structure, &plan, options, &config, &current_page);
        let result = with_layer_timeout(
            TimeoutLayer::Execution,
            config.execution_timeout(),
            "execute_wizard",
            replay,
        )
        .await;

        let outcome = match result {
            Ok(output) => match output.page_validation {
                Some((page, messages, screenshot)) => ExecutionOutcome::ValidationError {
                    page: Some(page),
                    messages,
                    invalid_fields: Vec::new(),
                    screenshot,
                },
                None => {
                    info!(
                        wizard_id,
                        pages = plan.pages.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "wizard executed"
                    );
                    ExecutionOutcome::Success {
                        wizard_id: wizard_id.to_string(),
                        pages_completed: plan.pages.len() as u32,
                        results: output.results,
                        warnings: output.warnings,
                        screenshots: output.screenshots,
                        execution_time_ms: started.elapsed().as_millis() as u64,
                    }
                }
            },
            Err(e) => {
                let page = current_page.load(Ordering::Relaxed);
                ExecutionOutcome::ExecutionError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                    page: (page > 0).then_some(page),
                    screenshot: failure_screenshot(&driver).await,
                }
            }
        };

        if let Err(e) = driver.close().await {
            warn!(wizard_id, error = %e, "browser release reported an error");
        }

        if let Some(bus) = self.config.event_bus() {
            let status = match &outcome {
                ExecutionOutcome::Success { .. } => "success",
                ExecutionOutcome::ValidationError { .. } => "validation_error",
                ExecutionOutcome::MissingData { .. } => "missing_data",
                ExecutionOutcome::ExecutionError { .. } => "execution_error",
            };
            bus.publish(AutomationEvent::ExecutionCompleted {
                wizard_id: wizard_id.to_string(),
                status: status.to_string(),
                elapsed_ms: started.elapsed().as_millis() as u64,
                timestamp: chrono::Utc::now(),
            });
        }
        outcome
    }

    async fn run_replay(
        &self,
        driver: &BrowserDriver,
        structure: &WizardStructure,
        plan: &ExecutionPlan,
        options: &ExecutionOptions,
        config: &AutomationConfig,
        current_page: &AtomicU32,
    ) -> Result<ReplayOutput, WizardError> {
        let mut screenshots = Vec::new();
        let mut warnings = Vec::new();

        // 6. Enter the wizard.
        goto_with_retry(driver, &structure.url).await?;
        if let Some(start) = &structure.start_action {
            driver.click_spec(start).await?;
            settle_transition(driver).await;
        }

        // 7. Replay every page in plan order.
        for page in &plan.pages {
            current_page.store(page.page_number, Ordering::Relaxed);
            debug!(page = page.page_number, title = page.page_title, "replaying page");

            for entry in &page.entries {
                run_primitive(
                    driver,
                    entry.interaction,
                    &entry.selector,
                    &entry.alternatives,
                    entry.value.as_deref(),
                )
                .await?;
            }

            if options.return_screenshots
                && let Ok(shot) = driver.screenshot().await
            {
                screenshots.push(shot);
            }

            let messages = driver.visible_errors(config.error_selectors()).await?;
            if !messages.is_empty() {
                let screenshot = driver.screenshot().await.ok();
                return Ok(ReplayOutput {
                    results: Value::Null,
                    warnings,
                    screenshots,
                    page_validation: Some((page.page_number, messages, screenshot)),
                });
            }

            if let Some(button) = &page.continue_button {
                driver.click_spec(button).await?;
                settle_transition(driver).await;
            }

            if let Some(bus) = self.config.event_bus() {
                bus.publish(AutomationEvent::PageReplayed {
                    wizard_id: structure.wizard_id.clone(),
                    page_number: page.page_number,
                    timestamp: chrono::Utc::now(),
                });
            }
        }

        // 8. Extract results from the terminal page.
        let extractor = self.extractors.get(&structure.wizard_id);
        let results = match extractor.extract(driver).await {
            Ok(value) => value,
            Err(e) => {
                warn!(wizard_id = structure.wizard_id, error = %e, "result extraction failed");
                warnings.push(format!("result extraction failed: {e}"));
                // A results screenshot always accompanies an extraction
                // failure so the caller can read the page themselves.
                if let Ok(shot) = driver.screenshot().await {
                    screenshots.push(shot);
                }
                Value::Null
            }
        };

        if options.return_screenshots
            && screenshots.is_empty()
            && let Ok(shot) = driver.screenshot().await
        {
            screenshots.push(shot);
        }

        Ok(ReplayOutput {
            results,
            warnings,
            screenshots,
            page_validation: None,
        })
    }

    fn effective_config(&self, options: &ExecutionOptions) -> Result<AutomationConfig, WizardError> {
        let mut config = self.config.clone();
        if let Some(quality) = options.screenshot_quality {
            if quality == 0 || quality > 100 {
                return Err(WizardError::Config(format!(
                    "screenshot_quality must be 1-100, got {quality}"
                )));
            }
            config.screenshot_quality = quality;
        }
        if let Some(seconds) = options.timeout_seconds {
            let l3_ms = seconds.saturating_mul(1000);
            if config.navigation_timeout_ms >= l3_ms {
                return Err(WizardError::Config(format!(
                    "timeout hierarchy violation: requested execution timeout {seconds}s does \
                     not exceed the navigation timeout {}ms",
                    config.navigation_timeout_ms
                )));
            }
            if l3_ms >= config.request_timeout_s.saturating_mul(1000) {
                return Err(WizardError::Config(format!(
                    "timeout hierarchy violation: requested execution timeout {seconds}s reaches \
                     the request timeout {}s",
                    config.request_timeout_s
                )));
            }
            config.execution_timeout_s = seconds;
        }
        Ok(config)
    }
}

/// Navigate with the two-retry back-off. L2 timeouts surface immediately;
/// only plain navigation failures retry.
async fn goto_with_retry(driver: &BrowserDriver, url: &str) -> Result<(), WizardError> {
    let mut attempt = 0usize;
    loop {
        match driver.goto(url).await {
            Ok(()) => return Ok(()),
            Err(e @ WizardError::NavigationFailed { .. }) => {
                if attempt >= NAVIGATION_BACKOFF.len() {
                    return Err(e);
                }
                warn!(url, attempt, error = %e, "navigation failed, backing off");
                tokio::time::sleep(NAVIGATION_BACKOFF[attempt]).await;
                attempt += 1;
            }
            Err(other) => return Err(other),
        }
    }
}

/// Wait for a navigation after a continue click, bounded: SPA wizards
/// re-render in place and never emit a load event.
async fn settle_transition(driver: &BrowserDriver) {
    tokio::select! {
        result = driver.wait_for_transition() => {
            if let Err(e) = result {
                debug!(error = %e, "transition wait ended with error");
            }
        }
        () = tokio::time::sleep(TRANSITION_SETTLE) => {
            debug!("no navigation event; assuming same-document transition");
        }
    }
}

async fn failure_screenshot(driver: &BrowserDriver) -> Option<Screenshot> {
    tokio::time::timeout(FAILURE_CAPTURE_LIMIT, driver.screenshot())
        .await
        .ok()?
        .ok()
}
