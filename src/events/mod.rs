//! Progress events published by the discovery and execution agents

pub mod bus;
pub mod types;

pub use bus::{AutomationEventBus, DEFAULT_EVENT_CAPACITY};
pub use types::{AutomationEvent, ShutdownReason};
