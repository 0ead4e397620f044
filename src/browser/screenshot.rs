//! Optimized screenshot capture
//!
//! Captures the viewport only, as JPEG, with an intelligent CSS zoom so
//! long pages still fit in one frame. Payload size is a hard contract for
//! length-budgeted tool transports: when a capture exceeds the byte
//! ceiling, quality steps down until it fits or hits the floor.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::WizardError;
use crate::utils::{
    MIN_SCREENSHOT_QUALITY, MIN_ZOOM_PERCENT, SCREENSHOT_QUALITY_STEP, atomic_write,
};

use super::js_scripts::PAGE_METRICS_SCRIPT;

/// Capture parameters derived from the automation config.
#[derive(Debug, Clone, Copy)]
pub struct ScreenshotSettings {
    pub quality: u8,
    pub max_bytes: usize,
}

/// A captured, size-disciplined JPEG.
///
/// Transports with typed content support should lift `data` into a
/// dedicated image part rather than leaving it embedded in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Screenshot {
    /// Always "jpeg".
    pub format: String,
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    /// CSS zoom applied during capture; 100 when content fit the viewport.
    pub zoom_percent: u32,
    /// Decoded payload size in bytes.
    pub byte_len: usize,
    /// Base64 image payload.
    pub data: String,
}

impl Screenshot {
    /// Persist the decoded JPEG for debugging runs.
    pub async fn persist(&self, dir: &Path, tag: &str) -> Result<std::path::PathBuf, WizardError> {
        let bytes = BASE64
            .decode(&self.data)
            .map_err(|e| WizardError::Other(anyhow::anyhow!("screenshot payload corrupt: {e}")))?;
        let path = dir.join(format!("{tag}.jpg"));
        atomic_write(&path, &bytes).await?;
        Ok(path)
    }
}

#[derive(Debug, Deserialize)]
struct PageMetrics {
    content_height: f64,
    viewport_height: f64,
    viewport_width: f64,
}

/// Zoom percentage for the given content/viewport heights:
/// `clamp(30, floor(100 * viewport / content), 100)`, with no zoom when
/// the content already fits.
#[must_use]
pub fn zoom_percent(content_height: f64, viewport_height: f64) -> u32 {
    if content_height <= 0.0 || viewport_height <= 0.0 || content_height <= viewport_height {
        return 100;
    }
    let raw = (100.0 * viewport_height / content_height).floor() as u32;
    raw.clamp(MIN_ZOOM_PERCENT, 100)
}

/// Capture the current viewport with zoom adaptation and the byte-ceiling
/// quality loop.
pub async fn capture(page: &Page, settings: ScreenshotSettings) -> Result<Screenshot, WizardError> {
    let metrics: PageMetrics = page
        .evaluate(PAGE_METRICS_SCRIPT)
        .await
        .map_err(|e| WizardError::BrowserCrash(format!("page metrics failed: {e}")))?
        .into_value()
        .map_err(|e| WizardError::Other(anyhow::anyhow!("page metrics shape: {e}")))?;

    let zoom = zoom_percent(metrics.content_height, metrics.viewport_height);
    if zoom < 100 {
        debug!(zoom, content = metrics.content_height, "applying capture zoom");
        set_zoom(page, &format!("{zoom}%")).await?;
    }

    let result = capture_with_quality_loop(page, settings).await;

    if zoom < 100 {
        // Restore even when capture failed; the page stays usable.
        if let Err(e) = set_zoom(page, "").await {
            warn!("failed to restore zoom after capture: {e}");
        }
    }

    let (bytes, quality) = result?;
    Ok(Screenshot {
        format: "jpeg".to_string(),
        quality,
        width: metrics.viewport_width as u32,
        height: metrics.viewport_height as u32,
        zoom_percent: zoom,
        byte_len: bytes.len(),
        data: BASE64.encode(&bytes),
    })
}

async fn capture_with_quality_loop(
    page: &Page,
    settings: ScreenshotSettings,
) -> Result<(Vec<u8>, u8), WizardError> {
    let mut quality = settings.quality;
    loop {
        let params = CaptureScreenshotParams {
            format: Some(CaptureScreenshotFormat::Jpeg),
            quality: Some(i64::from(quality)),
            capture_beyond_viewport: Some(false),
            ..Default::default()
        };
        let bytes = page
            .screenshot(params)
            .await
            .map_err(|e| WizardError::BrowserCrash(format!("screenshot capture failed: {e}")))?;

        if bytes.len() <= settings.max_bytes || quality <= MIN_SCREENSHOT_QUALITY {
            if bytes.len() > settings.max_bytes {
                warn!(
                    size = bytes.len(),
                    ceiling = settings.max_bytes,
                    "screenshot exceeds byte ceiling even at minimum quality"
                );
            }
            return Ok((bytes, quality));
        }

        let next = quality
            .saturating_sub(SCREENSHOT_QUALITY_STEP)
            .max(MIN_SCREENSHOT_QUALITY);
        debug!(
            size = bytes.len(),
            ceiling = settings.max_bytes,
            from = quality,
            to = next,
            "stepping down screenshot quality"
        );
        quality = next;
    }
}

async fn set_zoom(page: &Page, value: &str) -> Result<(), WizardError> {
    page.evaluate(format!(
        "document.documentElement.style.zoom = '{value}'"
    ))
    .await
    .map_err(|e| WizardError::BrowserCrash(format!("zoom adjustment failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::zoom_percent;

    #[test]
    fn no_zoom_when_content_fits() {
        assert_eq!(zoom_percent(700.0, 800.0), 100);
        assert_eq!(zoom_percent(800.0, 800.0), 100);
    }

    #[test]
    fn proportional_zoom_for_tall_content() {
        // 800 / 1600 -> 50%
        assert_eq!(zoom_percent(1600.0, 800.0), 50);
        // floor(100 * 800 / 1200) = 66
        assert_eq!(zoom_percent(1200.0, 800.0), 66);
    }

    #[test]
    fn zoom_clamps_at_thirty_percent() {
        // Ratio of 0.1 would be 10%, clamped to 30%.
        assert_eq!(zoom_percent(8000.0, 800.0), 30);
    }

    #[test]
    fn degenerate_heights_skip_zoom() {
        assert_eq!(zoom_percent(0.0, 800.0), 100);
        assert_eq!(zoom_percent(800.0, 0.0), 100);
    }
}
