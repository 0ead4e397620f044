//! Batch executor
//!
//! Runs heterogeneous actions strictly in request order. Later actions
//! may depend on DOM changes from earlier ones (conditional fields), so
//! there is no reordering and no parallelism. Exactly one screenshot is
//! captured after the final action succeeds or the batch halts; this is
//! the main lever keeping tool-call payloads inside the length budget.

use tracing::{debug, warn};

use crate::browser::{BrowserDriver, Screenshot};

use super::primitives::run_primitive;
use super::types::{ActionRequest, BatchReport, FailedAction};

/// Result of one batch: progress report plus the closing screenshot.
#[derive(Debug)]
pub struct BatchOutcome {
    pub report: BatchReport,
    pub screenshot: Option<Screenshot>,
}

/// Execute a batch against the session's current page.
///
/// Halts on first failure and reports `{completed, total, failed_action}`;
/// a partial batch is still progress and the session stays usable.
pub async fn execute_batch(driver: &BrowserDriver, actions: &[ActionRequest]) -> BatchOutcome {
    let total = actions.len();
    let mut completed = 0usize;
    let mut failed_action = None;

    for (index, action) in actions.iter().enumerate() {
        debug!(index, selector = action.selector(), "running batch action");
        let result = run_primitive(
            driver,
            action.interaction(),
            action.selector(),
            &[],
            action.value(),
        )
        .await;

        match result {
            Ok(()) => completed += 1,
            Err(e) => {
                warn!(index, selector = action.selector(), error = %e, "batch halted");
                failed_action = Some(FailedAction {
                    index,
                    selector: action.selector().to_string(),
                    error: e.to_string(),
                });
                break;
            }
        }
    }

    // One screenshot regardless of outcome, including the empty batch.
    let screenshot = match driver.screenshot().await {
        Ok(shot) => Some(shot),
        Err(e) => {
            warn!(error = %e, "closing screenshot failed");
            None
        }
    };

    BatchOutcome {
        report: BatchReport {
            completed,
            total,
            failed_action,
        },
        screenshot,
    }
}
