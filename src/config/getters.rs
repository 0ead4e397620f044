//! Getter methods for `AutomationConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::{AutomationConfig, BrowserEngine};

impl AutomationConfig {
    #[must_use]
    pub fn engine(&self) -> BrowserEngine {
        self.engine
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn slow_mo(&self) -> Duration {
        Duration::from_millis(self.slow_mo_ms)
    }

    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_w, self.viewport_h)
    }

    /// L1 page-default timeout for element operations.
    #[must_use]
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// L2 navigation timeout.
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// L3 whole-replay timeout.
    #[must_use]
    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_s)
    }

    /// L4 enclosing-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s)
    }

    #[must_use]
    pub fn screenshot_quality(&self) -> u8 {
        self.screenshot_quality
    }

    #[must_use]
    pub fn screenshot_max_bytes(&self) -> usize {
        self.screenshot_max_bytes
    }

    #[must_use]
    pub fn save_screenshots(&self) -> bool {
        self.save_screenshots
    }

    #[must_use]
    pub fn wizards_dir(&self) -> &Path {
        &self.wizards_dir
    }

    #[must_use]
    pub fn idle_session_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_session_timeout_s)
    }

    #[must_use]
    pub fn error_selectors(&self) -> &[String] {
        &self.error_selectors
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
