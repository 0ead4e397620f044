//! Discovery tool surface
//!
//! The typed operations an external driver invokes to explore a wizard.
//! Transport framing is out of scope: argument and output structs derive
//! `JsonSchema` so any binding can publish them, and screenshots ride in
//! a dedicated payload slot for transports with typed content parts.

use std::sync::Arc;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::actions::{ActionRequest, BatchReport, execute_batch};
use crate::browser::{BrowserDriver, PageInfo, Screenshot};
use crate::config::AutomationConfig;
use crate::error::WizardError;
use crate::events::{AutomationEvent, ShutdownReason};
use crate::schema::{
    StructureReport, UserDataSchema, pairing_warnings, validate_structure,
};
use crate::utils::is_valid_wizard_id;
use crate::wizard::{ClickSpec, SelectorType, WizardPage, WizardStructure};

use super::artifact::ArtifactStore;
use super::session::DiscoverySession;
use super::store::SessionStore;

/// Settle time after a click that may mutate or navigate the page.
const CLICK_SETTLE: Duration = Duration::from_millis(500);

/// A tool output plus its screenshot, kept out of the JSON body so
/// typed-content transports can surface the image as its own part.
#[derive(Debug, Clone, Serialize)]
pub struct ToolPayload<T> {
    pub body: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Screenshot>,
}

impl<T> ToolPayload<T> {
    fn new(body: T) -> Self {
        Self {
            body,
            screenshot: None,
        }
    }

    fn with_screenshot(body: T, screenshot: Option<Screenshot>) -> Self {
        Self { body, screenshot }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StartDiscoveryArgs {
    /// Landing or entry URL of the wizard.
    pub url: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StartDiscoveryOutput {
    pub session_id: String,
    pub current_url: String,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClickElementArgs {
    pub session_id: String,
    pub selector: String,
    #[serde(default)]
    pub selector_type: SelectorType,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ClickElementOutput {
    pub current_url: String,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteActionsArgs {
    pub session_id: String,
    pub actions: Vec<ActionRequest>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ExecuteActionsOutput {
    #[serde(flatten)]
    pub report: BatchReport,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPageInfoArgs {
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SavePageArgs {
    pub session_id: String,
    pub page: WizardPage,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SavePageOutput {
    pub total_pages_discovered: usize,
    pub partial_path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompleteDiscoveryArgs {
    pub session_id: String,
    pub wizard_name: String,
    pub wizard_id: String,
    #[serde(default)]
    pub start_action: Option<ClickSpec>,
    /// Required to replace an existing finished structure.
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CompleteDiscoveryOutput {
    pub path: String,
    pub structure: WizardStructure,
    pub report: StructureReport,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SaveSchemaArgs {
    pub wizard_id: String,
    /// JSON Schema draft-07 object describing the required user data.
    pub schema_content: Value,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SaveSchemaOutput {
    pub path: String,
    /// Structure/schema pairing problems, empty when consistent.
    pub warnings: Vec<String>,
}

/// The discovery agent's operations, shared across tool invocations.
pub struct DiscoveryTools {
    config: AutomationConfig,
    store: Arc<SessionStore>,
    artifacts: ArtifactStore,
}

impl DiscoveryTools {
    /// Build the tool set and start the session reaper.
    pub async fn new(config: AutomationConfig) -> Arc<Self> {
        let store =
            SessionStore::with_events(config.idle_session_timeout(), config.event_bus().cloned());
        store.start_reaper().await;
        let artifacts = ArtifactStore::new(config.wizards_dir());
        Arc::new(Self {
            config,
            store,
            artifacts,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    #[must_use]
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Open a browser on `url` and start a stateful session.
    pub async fn start_discovery(
        &self,
        args: StartDiscoveryArgs,
    ) -> Result<ToolPayload<StartDiscoveryOutput>, WizardError> {
        url::Url::parse(&args.url)
            .map_err(|e| WizardError::Config(format!("Invalid URL '{}': {e}", args.url)))?;

        let driver = BrowserDriver::launch(&self.config).await?;
        driver.goto(&args.url).await?;

        let session = DiscoverySession::new(driver, args.url.clone());
        let session_id = session.session_id().to_string();
        let shared = self.store.create(session).await;

        let session = shared.lock().await;
        let driver = session.driver()?;
        let current_url = driver.current_url().await?;
        let page_info = driver.page_info().await?;
        let screenshot = self.capture(driver, &session_id).await;

        info!(session_id, url = args.url, "discovery started");
        if let Some(bus) = self.config.event_bus() {
            bus.publish(AutomationEvent::DiscoveryStarted {
                session_id: session_id.clone(),
                url: args.url.clone(),
                timestamp: chrono::Utc::now(),
            });
        }
        Ok(ToolPayload::with_screenshot(
            StartDiscoveryOutput {
                session_id,
                current_url,
                page_info,
            },
            screenshot,
        ))
    }

    /// Click one element (navigation buttons, start links, labels).
    pub async fn click_element(
        &self,
        args: ClickElementArgs,
    ) -> Result<ToolPayload<ClickElementOutput>, WizardError> {
        let shared = self.store.lookup(&args.session_id).await?;
        let session = shared.lock().await;
        let driver = session.driver()?;

        driver
            .click_spec(&ClickSpec {
                selector: args.selector,
                selector_type: args.selector_type,
                label: None,
            })
            .await?;
        // The click may trigger a navigation or conditional rendering;
        // give the DOM a moment before inventorying it.
        tokio::time::sleep(CLICK_SETTLE).await;

        let current_url = driver.current_url().await?;
        let page_info = driver.page_info().await?;
        let screenshot = self.capture(driver, &args.session_id).await;

        Ok(ToolPayload::with_screenshot(
            ClickElementOutput {
                current_url,
                page_info,
            },
            screenshot,
        ))
    }

    /// Run an ordered batch of actions with one closing screenshot.
    pub async fn execute_actions(
        &self,
        args: ExecuteActionsArgs,
    ) -> Result<ToolPayload<ExecuteActionsOutput>, WizardError> {
        let shared = self.store.lookup(&args.session_id).await?;
        let session = shared.lock().await;
        let driver = session.driver()?;

        let outcome = execute_batch(driver, &args.actions).await;
        self.maybe_persist(outcome.screenshot.as_ref(), &args.session_id)
            .await;

        Ok(ToolPayload::with_screenshot(
            ExecuteActionsOutput {
                report: outcome.report,
            },
            outcome.screenshot,
        ))
    }

    /// Element inventory of the current page; no screenshot.
    pub async fn get_page_info(
        &self,
        args: GetPageInfoArgs,
    ) -> Result<ToolPayload<PageInfo>, WizardError> {
        let shared = self.store.lookup(&args.session_id).await?;
        let session = shared.lock().await;
        let page_info = session.driver()?.page_info().await?;
        Ok(ToolPayload::new(page_info))
    }

    /// Record one page and refresh the partial artifact.
    pub async fn save_page_metadata(
        &self,
        args: SavePageArgs,
    ) -> Result<ToolPayload<SavePageOutput>, WizardError> {
        let shared = self.store.lookup(&args.session_id).await?;
        let mut session = shared.lock().await;

        let page_number = args.page.page_number;
        let total = session.record_page(args.page);
        let partial = session.assemble_partial();
        let path = self
            .artifacts
            .write_partial(&args.session_id, &partial)
            .await?;

        if let Some(bus) = self.config.event_bus() {
            bus.publish(AutomationEvent::PageSaved {
                session_id: args.session_id.clone(),
                page_number,
                total_pages_discovered: total,
                timestamp: chrono::Utc::now(),
            });
        }

        Ok(ToolPayload::new(SavePageOutput {
            total_pages_discovered: total,
            partial_path: path.display().to_string(),
        }))
    }

    /// Assemble, validate, and persist the final structure.
    ///
    /// On validation failure the partial file and the session both stay
    /// alive so the driver can repair pages and retry; on success the
    /// session is destroyed and the partial removed.
    pub async fn complete_discovery(
        &self,
        args: CompleteDiscoveryArgs,
    ) -> Result<ToolPayload<CompleteDiscoveryOutput>, WizardError> {
        if !is_valid_wizard_id(&args.wizard_id) {
            return Err(WizardError::Config(format!(
                "wizard_id '{}' must match ^[a-z0-9-]+$",
                args.wizard_id
            )));
        }
        if self.artifacts.final_exists(&args.wizard_id).await && !args.overwrite {
            return Err(WizardError::Config(format!(
                "wizard '{}' already exists; pass overwrite to replace it",
                args.wizard_id
            )));
        }

        let shared = self.store.lookup(&args.session_id).await?;
        let structure = {
            let session = shared.lock().await;
            session.assemble(&args.wizard_id, &args.wizard_name, args.start_action.clone())
        };

        let report = validate_structure(&structure);
        if !report.is_complete {
            warn!(
                session_id = args.session_id,
                warnings = report.warnings.len(),
                "structure failed validation; partial retained"
            );
            return Err(WizardError::StructureInvalid {
                warnings: report.warnings,
            });
        }

        let path = self.artifacts.write_final(&structure).await?;
        self.artifacts.remove_partial(&args.session_id).await?;
        self.store.destroy(&args.session_id).await;

        info!(wizard_id = args.wizard_id, "discovery completed");
        if let Some(bus) = self.config.event_bus() {
            bus.publish(AutomationEvent::DiscoveryCompleted {
                session_id: args.session_id.clone(),
                wizard_id: args.wizard_id.clone(),
                total_pages: structure.total_pages,
                timestamp: chrono::Utc::now(),
            });
        }
        Ok(ToolPayload::new(CompleteDiscoveryOutput {
            path: path.display().to_string(),
            structure,
            report,
        }))
    }

    /// Persist the user-data schema paired with a wizard.
    pub async fn save_schema(
        &self,
        args: SaveSchemaArgs,
    ) -> Result<ToolPayload<SaveSchemaOutput>, WizardError> {
        if !is_valid_wizard_id(&args.wizard_id) {
            return Err(WizardError::Config(format!(
                "wizard_id '{}' must match ^[a-z0-9-]+$",
                args.wizard_id
            )));
        }
        let schema = UserDataSchema::from_value(args.schema_content.clone())?;

        let warnings = match self.artifacts.read_final(&args.wizard_id).await {
            Some(structure) => pairing_warnings(&structure, &schema),
            None => vec![format!(
                "no finished structure for '{}' yet; pairing not checked",
                args.wizard_id
            )],
        };

        let path = self
            .artifacts
            .write_schema(&args.wizard_id, schema.describe())
            .await?;

        Ok(ToolPayload::new(SaveSchemaOutput {
            path: path.display().to_string(),
            warnings,
        }))
    }

    /// Stop the reaper and close every live session.
    pub async fn shutdown(&self) {
        self.store.shutdown().await;
        if let Some(bus) = self.config.event_bus() {
            bus.shutdown(ShutdownReason::ServiceStopping);
        }
    }

    async fn capture(&self, driver: &BrowserDriver, session_id: &str) -> Option<Screenshot> {
        match driver.screenshot().await {
            Ok(shot) => {
                self.maybe_persist(Some(&shot), session_id).await;
                Some(shot)
            }
            Err(e) => {
                warn!(session_id, error = %e, "screenshot capture failed");
                None
            }
        }
    }

    async fn maybe_persist(&self, screenshot: Option<&Screenshot>, session_id: &str) {
        if !self.config.save_screenshots() {
            return;
        }
        let Some(shot) = screenshot else { return };
        let dir = self.config.wizards_dir().join("screenshots");
        let tag = format!("{session_id}-{}", chrono::Utc::now().timestamp_millis());
        if let Err(e) = shot.persist(&dir, &tag).await {
            warn!(session_id, error = %e, "failed to persist screenshot");
        }
    }
}
