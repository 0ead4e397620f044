//! Browser driver: one browser, one page, timeout-bounded operations
//!
//! Every element operation runs under the L1 page-default timeout and
//! navigations under L2. The native 30-second CDP default is overridden
//! at launch; nothing in this module may silently extend past its layer.

use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::element::Element;
use serde_json::Value;
use tracing::debug;

use crate::config::AutomationConfig;
use crate::error::{TimeoutLayer, WizardError};
use crate::wizard::{ClickSpec, SelectorType};

use super::js_scripts::{click_by_text_script, visible_errors_script};
use super::launch::{BrowserWrapper, launch_browser};
use super::page_info::{PageInfo, extract_page_info};
use super::screenshot::{Screenshot, ScreenshotSettings, capture};
use super::timeout::with_layer_timeout;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// JS function bodies evaluated on located elements.
const CLEAR_VALUE_FN: &str = r"
    function() {
        this.value = '';
        this.dispatchEvent(new Event('input', { bubbles: true }));
    }
";

const JS_CLICK_FN: &str = r"
    function() {
        this.click();
    }
";

const IS_VISIBLE_FN: &str = r"
    function() {
        const style = window.getComputedStyle(this);
        if (style.display === 'none' || style.visibility === 'hidden' || style.opacity === '0') {
            return false;
        }
        return this.offsetParent !== null || style.position === 'fixed';
    }
";

fn select_option_fn(value: &str) -> String {
    let escaped = serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
    function() {{
        const wanted = {escaped};
        let matched = false;
        for (const opt of this.options) {{
            if (opt.value === wanted || opt.textContent.trim() === wanted) {{
                this.value = opt.value;
                matched = true;
                break;
            }}
        }}
        if (!matched) {{
            throw new Error('no option matched ' + wanted);
        }}
        this.dispatchEvent(new Event('input', {{ bubbles: true }}));
        this.dispatchEvent(new Event('change', {{ bubbles: true }}));
        return matched;
    }}
    "#
    )
}

/// A launched browser plus the page it automates.
#[derive(Debug)]
pub struct BrowserDriver {
    wrapper: BrowserWrapper,
    page: Page,
    op_timeout: Duration,
    nav_timeout: Duration,
    slow_mo: Duration,
    screenshot_settings: ScreenshotSettings,
}

impl BrowserDriver {
    /// Launch a browser per config, apply stealth, and open a blank page.
    pub async fn launch(config: &AutomationConfig) -> Result<Self, WizardError> {
        let wrapper = launch_browser(config).await?;
        let page = wrapper
            .browser()
            .new_page("about:blank")
            .await
            .map_err(|e| WizardError::BrowserCrash(format!("failed to open page: {e}")))?;

        // Stealth scripts must be registered before the first navigation.
        crate::stealth::inject(&page).await?;

        Ok(Self {
            wrapper,
            page,
            op_timeout: config.op_timeout(),
            nav_timeout: config.navigation_timeout(),
            slow_mo: config.slow_mo(),
            screenshot_settings: ScreenshotSettings {
                quality: config.screenshot_quality(),
                max_bytes: config.screenshot_max_bytes(),
            },
        })
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// Navigate under the L2 timeout and wait for the load event.
    pub async fn goto(&self, url: &str) -> Result<(), WizardError> {
        with_layer_timeout(
            TimeoutLayer::Navigation,
            self.nav_timeout,
            "goto",
            async {
                self.page
                    .goto(url)
                    .await
                    .map_err(|e| WizardError::NavigationFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })?;
                self.page
                    .wait_for_navigation()
                    .await
                    .map_err(|e| WizardError::NavigationFailed {
                        url: url.to_string(),
                        reason: format!("load wait: {e}"),
                    })?;
                Ok(())
            },
        )
        .await?;
        self.pace().await;
        Ok(())
    }

    /// Wait for an in-flight navigation (after a continue click) under L2.
    pub async fn wait_for_transition(&self) -> Result<(), WizardError> {
        with_layer_timeout(
            TimeoutLayer::Navigation,
            self.nav_timeout,
            "wait_for_navigation",
            async {
                self.page
                    .wait_for_navigation()
                    .await
                    .map_err(|e| WizardError::NavigationFailed {
                        url: "<transition>".to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(())
            },
        )
        .await
    }

    pub async fn current_url(&self) -> Result<String, WizardError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| WizardError::BrowserCrash(format!("url query failed: {e}")))?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    /// Locate one element under the L1 timeout.
    pub async fn find_element(&self, selector: &str) -> Result<Element, WizardError> {
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "find_element",
            async {
                self.page
                    .find_element(selector)
                    .await
                    .map_err(|e| WizardError::ElementNotFound {
                        selector: selector.to_string(),
                        alternatives_tried: Vec::new(),
                        diagnostic: e.to_string(),
                    })
            },
        )
        .await
    }

    /// Poll for a selector until it appears or L1 expires.
    pub async fn wait_for_selector(&self, selector: &str) -> Result<(), WizardError> {
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "wait_for_selector",
            async {
                loop {
                    if self.page.find_element(selector).await.is_ok() {
                        return Ok(());
                    }
                    tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
                }
            },
        )
        .await
    }

    /// Evaluate an expression under the L1 timeout, returning its JSON value.
    pub async fn evaluate(&self, js: &str) -> Result<Value, WizardError> {
        let js = js.to_string();
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "evaluate_js",
            async {
                let result = self
                    .page
                    .evaluate(js)
                    .await
                    .map_err(|e| WizardError::BrowserCrash(format!("evaluate failed: {e}")))?;
                Ok(result.value().cloned().unwrap_or(Value::Null))
            },
        )
        .await
    }

    /// Click a located element.
    pub async fn click_element(&self, element: &Element) -> Result<(), WizardError> {
        with_layer_timeout(TimeoutLayer::PageDefault, self.op_timeout, "click", async {
            element
                .scroll_into_view()
                .await
                .map_err(|e| WizardError::ElementNotInteractable {
                    selector: String::new(),
                    reason: format!("scroll_into_view: {e}"),
                })?;
            element
                .click()
                .await
                .map_err(|e| WizardError::ElementNotInteractable {
                    selector: String::new(),
                    reason: e.to_string(),
                })?;
            Ok(())
        })
        .await?;
        self.pace().await;
        Ok(())
    }

    /// Clear and type into a located element.
    pub async fn fill_element(&self, element: &Element, value: &str) -> Result<(), WizardError> {
        with_layer_timeout(TimeoutLayer::PageDefault, self.op_timeout, "fill", async {
            element
                .scroll_into_view()
                .await
                .map_err(|e| WizardError::ElementNotInteractable {
                    selector: String::new(),
                    reason: format!("scroll_into_view: {e}"),
                })?;
            element
                .focus()
                .await
                .map_err(|e| WizardError::ElementNotInteractable {
                    selector: String::new(),
                    reason: format!("focus: {e}"),
                })?;
            self.call_fn(element, CLEAR_VALUE_FN).await?;
            element
                .type_str(value)
                .await
                .map_err(|e| WizardError::ElementNotInteractable {
                    selector: String::new(),
                    reason: format!("type: {e}"),
                })?;
            Ok(())
        })
        .await?;
        self.pace().await;
        Ok(())
    }

    /// Press a key on a located element.
    pub async fn press_key(&self, element: &Element, key: &str) -> Result<(), WizardError> {
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "press_key",
            async {
                element
                    .press_key(key)
                    .await
                    .map_err(|e| WizardError::ElementNotInteractable {
                        selector: String::new(),
                        reason: format!("press_key({key}): {e}"),
                    })?;
                Ok(())
            },
        )
        .await?;
        self.pace().await;
        Ok(())
    }

    /// Dispatch a DOM click via JS, ignoring visibility.
    pub async fn js_click_element(&self, element: &Element) -> Result<(), WizardError> {
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "javascript_click",
            async { self.call_fn(element, JS_CLICK_FN).await.map(|_| ()) },
        )
        .await?;
        self.pace().await;
        Ok(())
    }

    /// Set a native select to the option matching `value` (by option
    /// value first, then by visible label), firing input+change.
    pub async fn select_option(&self, element: &Element, value: &str) -> Result<(), WizardError> {
        let function = select_option_fn(value);
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "select_option",
            async { self.call_fn(element, &function).await.map(|_| ()) },
        )
        .await?;
        self.pace().await;
        Ok(())
    }

    /// Computed visibility of a located element.
    pub async fn is_visible(&self, element: &Element) -> Result<bool, WizardError> {
        let value = self.call_fn(element, IS_VISIBLE_FN).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Click a recorded `ClickSpec`, resolving its selector type.
    pub async fn click_spec(&self, spec: &ClickSpec) -> Result<(), WizardError> {
        match spec.selector_type {
            SelectorType::Text => self.click_by_text(&spec.selector).await,
            SelectorType::Id => {
                let css = format!("#{}", spec.selector.trim_start_matches('#'));
                let element = self.find_element(&css).await?;
                self.click_element(&element).await
            }
            SelectorType::Css => {
                let element = self.find_element(&spec.selector).await?;
                self.click_element(&element).await
            }
            SelectorType::Auto => {
                if looks_like_css(&spec.selector) {
                    let element = self.find_element(&spec.selector).await?;
                    self.click_element(&element).await
                } else {
                    // Bare token: try it as an id, fall back to text.
                    let css = format!("#{}", spec.selector);
                    match self.page.find_element(css.as_str()).await {
                        Ok(element) => self.click_element(&element).await,
                        Err(_) => self.click_by_text(&spec.selector).await,
                    }
                }
            }
        }
    }

    async fn click_by_text(&self, text: &str) -> Result<(), WizardError> {
        let clicked = self.evaluate(&click_by_text_script(text)).await?;
        if clicked.as_bool() == Some(true) {
            self.pace().await;
            Ok(())
        } else {
            Err(WizardError::ElementNotFound {
                selector: text.to_string(),
                alternatives_tried: Vec::new(),
                diagnostic: "no clickable element with matching visible text".to_string(),
            })
        }
    }

    /// Capture an optimized viewport screenshot.
    pub async fn screenshot(&self) -> Result<Screenshot, WizardError> {
        capture(&self.page, self.screenshot_settings).await
    }

    /// Inventory the page's interactive elements (no screenshot).
    pub async fn page_info(&self) -> Result<PageInfo, WizardError> {
        with_layer_timeout(
            TimeoutLayer::PageDefault,
            self.op_timeout,
            "get_page_info",
            extract_page_info(&self.page),
        )
        .await
    }

    /// Visible texts matching the page-level error selectors.
    pub async fn visible_errors(&self, selectors: &[String]) -> Result<Vec<String>, WizardError> {
        let value = self.evaluate(&visible_errors_script(selectors)).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Gracefully close the browser and release its profile.
    pub async fn close(self) -> Result<(), WizardError> {
        debug!("closing browser driver");
        self.wrapper.shutdown().await.map_err(WizardError::Other)
    }

    async fn call_fn(&self, element: &Element, function: &str) -> Result<Value, WizardError> {
        let returns = element.call_js_fn(function, false).await.map_err(|e| {
            WizardError::ElementNotInteractable {
                selector: String::new(),
                reason: format!("js call failed: {e}"),
            }
        })?;
        if let Some(details) = returns.exception_details {
            return Err(WizardError::ElementNotInteractable {
                selector: String::new(),
                reason: format!("js exception: {}", details.text),
            });
        }
        Ok(returns.result.value.unwrap_or(Value::Null))
    }

    async fn pace(&self) {
        if !self.slow_mo.is_zero() {
            tokio::time::sleep(self.slow_mo).await;
        }
    }
}

/// Whether a selector string is unambiguously CSS rather than a bare id
/// token or visible text.
#[must_use]
pub fn looks_like_css(selector: &str) -> bool {
    selector.starts_with('#')
        || selector.starts_with('.')
        || selector.contains(['[', '>', '+', '~'])
        || (selector.contains(' ') && selector.contains(['#', '.']))
}

#[cfg(test)]
mod tests {
    use super::looks_like_css;

    #[test]
    fn css_detection() {
        assert!(looks_like_css("#Radio_MaritalStatus"));
        assert!(looks_like_css(".usa-button"));
        assert!(looks_like_css("[name=\"state\"]"));
        assert!(looks_like_css("form > button"));
        assert!(!looks_like_css("Start"));
        assert!(!looks_like_css("Get Started"));
    }
}
