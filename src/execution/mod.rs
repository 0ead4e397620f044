//! Execution agent: field resolution, atomic replay, result extraction

pub mod extract;
pub mod pipeline;
pub mod plan;
pub mod types;

pub use extract::{ExtractorRegistry, RegionTextExtractor, ResultExtractor};
pub use pipeline::ExecutionPipeline;
pub use plan::{ExecutionPlan, PlannedEntry, PlannedPage, build_plan};
pub use types::{ExecutionOptions, ExecutionOutcome, WizardInfo};
