//! Layered timeout wrappers
//!
//! Every browser operation runs inside a `tokio::time::timeout` tagged
//! with its layer (L1 element ops, L2 navigation, L3 replay). The caller
//! hierarchy guarantees L1 = L2 < L3 < L4, so an expiring outer layer
//! always interrupts the inner awaits rather than racing them.

use std::future::Future;
use std::time::Duration;

use crate::error::{TimeoutLayer, WizardError};

/// Run `operation` under the given layer's deadline.
///
/// Expiry abandons the in-flight future and surfaces a layer-tagged
/// timeout error; no retry happens at the expired layer.
pub async fn with_layer_timeout<F, T>(
    layer: TimeoutLayer,
    limit: Duration,
    operation_name: &str,
    operation: F,
) -> Result<T, WizardError>
where
    F: Future<Output = Result<T, WizardError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(WizardError::Timeout {
            layer,
            millis: limit.as_millis() as u64,
            operation: operation_name.to_string(),
        }),
    }
}
