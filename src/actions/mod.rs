//! Action primitives, selection rules, and the batch executor

pub mod batch;
pub mod primitives;
pub mod selection;
pub mod types;

pub use batch::{BatchOutcome, execute_batch};
pub use primitives::run_primitive;
pub use selection::{ElementProbe, classify};
pub use types::{ActionRequest, BatchReport, FailedAction};
