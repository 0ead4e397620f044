//! formwizard: discovery and execution agents for multi-page form wizards
//!
//! Two cooperating agents share a JSON artifact contract:
//!
//! - the **discovery agent** keeps a browser alive across tool calls from
//!   an external vision-capable driver, capturing selectors and
//!   interaction semantics into a *wizard structure* plus a *user-data
//!   schema* (JSON Schema draft-07);
//! - the **execution agent** validates user data against that schema and
//!   replays every page atomically in one browser lifetime under a strict
//!   L1 ≤ L2 < L3 < L4 timeout hierarchy.
//!
//! Transport framing, HTTP scaffolding, and auth live outside this crate;
//! the tool surfaces here are typed async operations any binding can
//! expose.

pub mod actions;
pub mod browser;
pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod execution;
pub mod schema;
pub mod stealth;
pub mod utils;
pub mod wizard;

pub use actions::{ActionRequest, BatchReport, FailedAction, execute_batch, run_primitive};
pub use browser::{
    BrowserDriver, BrowserWrapper, PageInfo, Screenshot, find_browser_executable, launch_browser,
};
pub use config::{AutomationConfig, AutomationConfigBuilder, BrowserEngine};
pub use discovery::{
    ArtifactStore, DiscoverySession, DiscoveryTools, SessionStore, ToolPayload,
};
pub use error::{TimeoutLayer, WizardError};
pub use events::{AutomationEvent, AutomationEventBus, ShutdownReason};
pub use execution::{
    ExecutionOptions, ExecutionOutcome, ExecutionPipeline, ExtractorRegistry, ResultExtractor,
    WizardInfo,
};
pub use schema::{
    DataReport, InvalidField, MissingField, StructureReport, UserDataSchema, pairing_warnings,
    validate_structure,
};
pub use wizard::{
    ClickSpec, Field, FieldType, Interaction, SelectorType, WizardCatalog, WizardPage,
    WizardStructure, WizardSummary,
};
