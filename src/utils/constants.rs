//! Shared configuration constants
//!
//! Default values used throughout the crate to keep the timeout hierarchy,
//! screenshot discipline, and session lifecycle consistent.

use std::time::Duration;

/// Default page-level operation timeout (L1): 120 seconds.
///
/// Applied to clicks, fills, and element waits. Must never exceed the
/// navigation timeout; the config builder enforces the full hierarchy.
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 120_000;

/// Default whole-replay timeout (L3): 180 seconds.
pub const DEFAULT_EXECUTION_TIMEOUT_S: u64 = 180;

/// Default enclosing-request timeout (L4): 240 seconds.
///
/// The library never sleeps against L4 itself; it only validates that
/// L3 stays strictly below it so a deployment-imposed request deadline
/// cannot fire mid-replay.
pub const DEFAULT_REQUEST_TIMEOUT_S: u64 = 240;

/// Screenshot quality: JPEG 60.
///
/// Tuned for length-budgeted tool transports: a 1280x800 viewport at
/// quality 60 lands around 30-50KB. Raising this blows the payload
/// ceiling quickly on image-heavy pages.
pub const DEFAULT_SCREENSHOT_QUALITY: u8 = 60;

/// Re-compression ceiling for screenshot payloads: 50 KB.
pub const DEFAULT_SCREENSHOT_MAX_BYTES: usize = 50 * 1024;

/// Quality floor when stepping down to satisfy the byte ceiling.
pub const MIN_SCREENSHOT_QUALITY: u8 = 20;

/// Step size for the quality reduction loop.
pub const SCREENSHOT_QUALITY_STEP: u8 = 15;

/// Lower clamp for the intelligent-zoom percentage.
pub const MIN_ZOOM_PERCENT: u32 = 30;

/// Default viewport, drives the intelligent-zoom denominator.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Settle time after filling a typeahead before pressing Enter.
pub const TYPEAHEAD_SETTLE: Duration = Duration::from_millis(500);

/// Single in-primitive retry delay.
pub const PRIMITIVE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Navigation retry back-off schedule (two retries).
pub const NAVIGATION_BACKOFF: [Duration; 2] = [Duration::from_millis(250), Duration::from_secs(1)];

/// Idle discovery sessions are reaped after this many seconds by default.
pub const DEFAULT_IDLE_SESSION_TIMEOUT_S: u64 = 1800;

/// How often the session reaper wakes up.
pub const REAPER_INTERVAL: Duration = Duration::from_secs(60);

/// Environment variable that relocates the wizards directory for
/// deployed packages without a code change.
pub const WIZARDS_DIR_ENV: &str = "FORMWIZARD_WIZARDS_DIR";

/// Default on-disk root for wizard artifacts.
pub const DEFAULT_WIZARDS_DIR: &str = "wizards";

/// Version stamped into discovered structures as `discovery_version`.
pub const DISCOVERY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chrome user agent string for stealth mode
///
/// Matches a recent stable Chrome on Windows. Sites check for consistency
/// between the UA string and other fingerprinting signals, so this value
/// pairs with the navigator overrides in the stealth module.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// DOM selectors scanned for page-level validation errors after each
/// page of a replay. Overridable per config.
pub const DEFAULT_ERROR_SELECTORS: &[&str] = &[
    ".error",
    ".field-error",
    ".validation-error",
    ".usa-error-message",
    "[role=\"alert\"]",
    ".alert-danger",
];
