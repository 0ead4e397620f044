//! The five action primitives
//!
//! Deterministic semantics per primitive, a single in-primitive retry
//! with a settle delay, and ordered fallback through selector
//! alternatives. A `click` on a non-visible element surfaces
//! `element_not_interactable`; routing hidden toggles to
//! `javascript_click` is a discovery-time selection decision, recorded
//! in the structure, never substituted at runtime.

use chromiumoxide::element::Element;
use tracing::debug;

use crate::browser::{BrowserDriver, with_layer_timeout};
use crate::error::{TimeoutLayer, WizardError};
use crate::utils::{PRIMITIVE_RETRY_DELAY, TYPEAHEAD_SETTLE};
use crate::wizard::Interaction;

/// Run one primitive against the page, retrying once on failure.
pub async fn run_primitive(
    driver: &BrowserDriver,
    interaction: Interaction,
    selector: &str,
    alternatives: &[String],
    value: Option<&str>,
) -> Result<(), WizardError> {
    match execute_once(driver, interaction, selector, alternatives, value).await {
        Ok(()) => Ok(()),
        Err(first) => {
            debug!(selector, error = %first, "primitive failed, retrying once");
            tokio::time::sleep(PRIMITIVE_RETRY_DELAY).await;
            execute_once(driver, interaction, selector, alternatives, value)
                .await
                .map_err(|err| tag_selector(err, selector))
        }
    }
}

async fn execute_once(
    driver: &BrowserDriver,
    interaction: Interaction,
    selector: &str,
    alternatives: &[String],
    value: Option<&str>,
) -> Result<(), WizardError> {
    let (element, resolved) = locate(driver, selector, alternatives).await?;
    if resolved != selector {
        debug!(selector, resolved, "selector alternative succeeded");
    }

    let result: Result<(), WizardError> = async {
        match interaction {
            Interaction::Fill => {
                let value = require_value(value, selector)?;
                driver.fill_element(&element, value).await
            }
            Interaction::FillEnter => {
                let value = require_value(value, selector)?;
                driver.fill_element(&element, value).await?;
                // Suggestion lists render asynchronously; Enter too early
                // commits the raw text instead of the first suggestion.
                tokio::time::sleep(TYPEAHEAD_SETTLE).await;
                driver.press_key(&element, "Enter").await
            }
            Interaction::Click => {
                if driver.is_visible(&element).await? {
                    driver.click_element(&element).await
                } else {
                    Err(WizardError::ElementNotInteractable {
                        selector: selector.to_string(),
                        reason: "element is not visible".to_string(),
                    })
                }
            }
            Interaction::JavascriptClick => driver.js_click_element(&element).await,
            Interaction::Select => {
                let value = require_value(value, selector)?;
                driver.select_option(&element, value).await
            }
        }
    }
    .await;
    result.map_err(|err| tag_selector(err, resolved.as_str()))
}

/// Try the recorded selector, then each alternative in order, inside a
/// single L1 window. First success wins; the winner is not re-recorded.
async fn locate(
    driver: &BrowserDriver,
    selector: &str,
    alternatives: &[String],
) -> Result<(Element, String), WizardError> {
    let op_timeout = driver.op_timeout();
    with_layer_timeout(TimeoutLayer::PageDefault, op_timeout, "locate", async {
        let mut last_error = String::new();
        for candidate in std::iter::once(selector).chain(alternatives.iter().map(String::as_str)) {
            match driver.page().find_element(candidate).await {
                Ok(element) => return Ok((element, candidate.to_string())),
                Err(e) => last_error = e.to_string(),
            }
        }
        Err(WizardError::ElementNotFound {
            selector: selector.to_string(),
            alternatives_tried: alternatives.to_vec(),
            diagnostic: if last_error.is_empty() {
                "selector matched nothing".to_string()
            } else {
                last_error
            },
        })
    })
    .await
}

fn require_value<'a>(value: Option<&'a str>, selector: &str) -> Result<&'a str, WizardError> {
    value.ok_or_else(|| {
        WizardError::ElementNotInteractable {
            selector: selector.to_string(),
            reason: "primitive requires a value but none was resolved".to_string(),
        }
    })
}

/// Driver-facing errors carry the selector they failed on; the element
/// helpers can't know it, so it is stamped here.
fn tag_selector(err: WizardError, selector: &str) -> WizardError {
    match err {
        WizardError::ElementNotFound {
            selector: s,
            alternatives_tried,
            diagnostic,
        } if s.is_empty() => WizardError::ElementNotFound {
            selector: selector.to_string(),
            alternatives_tried,
            diagnostic,
        },
        WizardError::ElementNotInteractable { selector: s, reason } if s.is_empty() => {
            WizardError::ElementNotInteractable {
                selector: selector.to_string(),
                reason,
            }
        }
        other => other,
    }
}
