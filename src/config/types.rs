//! Core configuration types for wizard automation
//!
//! `AutomationConfig` carries the browser settings, the four-layer
//! timeout hierarchy, the screenshot discipline, and the artifact
//! directory layout. Instances are built through the validating builder;
//! a config that violates the timeout hierarchy cannot exist.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::AutomationEventBus;

/// Browser engine selection.
///
/// This driver launches Chromium over CDP only; WebKit and Firefox
/// support is out of scope for this crate, and selecting either fails at
/// launch with a configuration error. The variants stay in the enum so
/// configurations and artifacts remain portable to drivers that do
/// support them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEngine {
    #[default]
    Chromium,
    Webkit,
    Firefox,
}

/// Main configuration for the discovery and execution agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    pub(crate) engine: BrowserEngine,
    pub(crate) headless: bool,
    /// Per-operation delay in milliseconds; 0 in production.
    pub(crate) slow_mo_ms: u64,
    pub(crate) viewport_w: u32,
    pub(crate) viewport_h: u32,

    /// L1 page-default and L2 navigation timeout, in milliseconds.
    ///
    /// **INVARIANT:** `navigation_timeout_ms < execution_timeout_s * 1000
    /// < request_timeout_s * 1000` (validated in the builder). Native
    /// 30-second driver defaults are overridden with this value at page
    /// creation.
    pub(crate) navigation_timeout_ms: u64,
    /// L3 whole-replay timeout, in seconds.
    pub(crate) execution_timeout_s: u64,
    /// L4 enclosing-request timeout, in seconds (deployment-imposed).
    pub(crate) request_timeout_s: u64,

    /// JPEG quality 1-100 for captures.
    pub(crate) screenshot_quality: u8,
    /// Re-compression ceiling for screenshot payloads.
    pub(crate) screenshot_max_bytes: usize,
    /// Persist captures under the wizards directory for debugging.
    pub(crate) save_screenshots: bool,

    /// Root directory for wizard artifacts.
    ///
    /// Resolution order: explicit builder value, then the
    /// `FORMWIZARD_WIZARDS_DIR` environment override, then `./wizards`.
    pub(crate) wizards_dir: PathBuf,

    /// Reaper threshold for idle discovery sessions, in seconds.
    pub(crate) idle_session_timeout_s: u64,

    /// DOM selectors scanned for page-level validation errors during
    /// replay.
    pub(crate) error_selectors: Vec<String>,

    /// Chrome user data directory override for profile isolation.
    /// When unset each browser gets a unique temp profile.
    #[serde(skip)]
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Optional bus for progress events. When attached, the discovery
    /// tools and the execution pipeline publish `AutomationEvent`s to it.
    #[serde(skip)]
    pub(crate) event_bus: Option<Arc<AutomationEventBus>>,
}

impl AutomationConfig {
    /// Attach an event bus for progress events.
    #[must_use]
    pub fn with_event_bus(mut self, bus: Arc<AutomationEventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Get the event bus if attached.
    #[must_use]
    pub fn event_bus(&self) -> Option<&Arc<AutomationEventBus>> {
        self.event_bus.as_ref()
    }
}
