//! Configuration module
//!
//! Provides `AutomationConfig` and its validating builder. The builder is
//! the only way to obtain a config, which is how the timeout hierarchy
//! (L1 = L2 < L3 < L4) stays an invariant rather than a convention.

pub mod builder;
pub mod getters;
pub mod types;

pub use builder::AutomationConfigBuilder;
pub use types::{AutomationConfig, BrowserEngine};
