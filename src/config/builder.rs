//! Validating builder for `AutomationConfig`
//!
//! Every field has a production-safe default, so the builder has no
//! required stages; `build()` is where the timeout hierarchy is
//! enforced. A hierarchy violation is a configuration error and no
//! partial run may begin, so it fails here rather than at first use.

use std::path::PathBuf;

use crate::error::WizardError;
use crate::utils::{
    DEFAULT_ERROR_SELECTORS, DEFAULT_EXECUTION_TIMEOUT_S, DEFAULT_IDLE_SESSION_TIMEOUT_S,
    DEFAULT_NAVIGATION_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_S, DEFAULT_SCREENSHOT_MAX_BYTES,
    DEFAULT_SCREENSHOT_QUALITY, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
    DEFAULT_WIZARDS_DIR, WIZARDS_DIR_ENV,
};

use super::types::{AutomationConfig, BrowserEngine};

pub struct AutomationConfigBuilder {
    engine: BrowserEngine,
    headless: bool,
    slow_mo_ms: u64,
    viewport_w: u32,
    viewport_h: u32,
    navigation_timeout_ms: u64,
    execution_timeout_s: u64,
    request_timeout_s: u64,
    screenshot_quality: u8,
    screenshot_max_bytes: usize,
    save_screenshots: bool,
    wizards_dir: Option<PathBuf>,
    idle_session_timeout_s: u64,
    error_selectors: Vec<String>,
    chrome_data_dir: Option<PathBuf>,
}

impl Default for AutomationConfigBuilder {
    fn default() -> Self {
        Self {
            engine: BrowserEngine::Chromium,
            headless: true,
            slow_mo_ms: 0,
            viewport_w: DEFAULT_VIEWPORT_WIDTH,
            viewport_h: DEFAULT_VIEWPORT_HEIGHT,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            execution_timeout_s: DEFAULT_EXECUTION_TIMEOUT_S,
            request_timeout_s: DEFAULT_REQUEST_TIMEOUT_S,
            screenshot_quality: DEFAULT_SCREENSHOT_QUALITY,
            screenshot_max_bytes: DEFAULT_SCREENSHOT_MAX_BYTES,
            save_screenshots: false,
            wizards_dir: None,
            idle_session_timeout_s: DEFAULT_IDLE_SESSION_TIMEOUT_S,
            error_selectors: DEFAULT_ERROR_SELECTORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            chrome_data_dir: None,
        }
    }
}

impl AutomationConfig {
    #[must_use]
    pub fn builder() -> AutomationConfigBuilder {
        AutomationConfigBuilder::default()
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        AutomationConfigBuilder::default()
            .build()
            .unwrap_or_else(|e| panic!("default config satisfies the timeout hierarchy: {e}"))
    }
}

impl AutomationConfigBuilder {
    #[must_use]
    pub fn engine(mut self, engine: BrowserEngine) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn slow_mo_ms(mut self, slow_mo_ms: u64) -> Self {
        self.slow_mo_ms = slow_mo_ms;
        self
    }

    #[must_use]
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_w = width;
        self.viewport_h = height;
        self
    }

    #[must_use]
    pub fn navigation_timeout_ms(mut self, millis: u64) -> Self {
        self.navigation_timeout_ms = millis;
        self
    }

    #[must_use]
    pub fn execution_timeout_s(mut self, seconds: u64) -> Self {
        self.execution_timeout_s = seconds;
        self
    }

    #[must_use]
    pub fn request_timeout_s(mut self, seconds: u64) -> Self {
        self.request_timeout_s = seconds;
        self
    }

    #[must_use]
    pub fn screenshot_quality(mut self, quality: u8) -> Self {
        self.screenshot_quality = quality;
        self
    }

    #[must_use]
    pub fn screenshot_max_bytes(mut self, bytes: usize) -> Self {
        self.screenshot_max_bytes = bytes;
        self
    }

    #[must_use]
    pub fn save_screenshots(mut self, save: bool) -> Self {
        self.save_screenshots = save;
        self
    }

    #[must_use]
    pub fn wizards_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.wizards_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn idle_session_timeout_s(mut self, seconds: u64) -> Self {
        self.idle_session_timeout_s = seconds;
        self
    }

    #[must_use]
    pub fn error_selectors(mut self, selectors: Vec<String>) -> Self {
        self.error_selectors = selectors;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }

    /// Validate and build.
    ///
    /// Enforces `L1 = L2 < L3 < L4` and the screenshot quality range.
    pub fn build(self) -> Result<AutomationConfig, WizardError> {
        let l2_ms = self.navigation_timeout_ms;
        let l3_ms = self.execution_timeout_s.saturating_mul(1000);
        let l4_ms = self.request_timeout_s.saturating_mul(1000);

        if l2_ms == 0 {
            return Err(WizardError::Config(
                "navigation_timeout_ms must be positive".to_string(),
            ));
        }
        if l2_ms >= l3_ms {
            return Err(WizardError::Config(format!(
                "timeout hierarchy violation: navigation timeout ({l2_ms}ms) must be strictly \
                 below execution timeout ({l3_ms}ms)"
            )));
        }
        if l3_ms >= l4_ms {
            return Err(WizardError::Config(format!(
                "timeout hierarchy violation: execution timeout ({l3_ms}ms) must be strictly \
                 below request timeout ({l4_ms}ms)"
            )));
        }
        if self.screenshot_quality == 0 || self.screenshot_quality > 100 {
            return Err(WizardError::Config(format!(
                "screenshot_quality must be 1-100, got {}",
                self.screenshot_quality
            )));
        }
        if self.viewport_w == 0 || self.viewport_h == 0 {
            return Err(WizardError::Config("viewport must be non-zero".to_string()));
        }

        let wizards_dir = self.wizards_dir.unwrap_or_else(|| {
            std::env::var(WIZARDS_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WIZARDS_DIR))
        });

        Ok(AutomationConfig {
            engine: self.engine,
            headless: self.headless,
            slow_mo_ms: self.slow_mo_ms,
            viewport_w: self.viewport_w,
            viewport_h: self.viewport_h,
            navigation_timeout_ms: self.navigation_timeout_ms,
            execution_timeout_s: self.execution_timeout_s,
            request_timeout_s: self.request_timeout_s,
            screenshot_quality: self.screenshot_quality,
            screenshot_max_bytes: self.screenshot_max_bytes,
            save_screenshots: self.save_screenshots,
            wizards_dir,
            idle_session_timeout_s: self.idle_session_timeout_s,
            error_selectors: self.error_selectors,
            chrome_data_dir: self.chrome_data_dir,
            event_bus: None,
        })
    }
}
