//! Discovery agent: stateful sessions, incremental artifacts, tool surface

pub mod artifact;
pub mod pages;
pub mod session;
pub mod store;
pub mod tools;

pub use artifact::ArtifactStore;
pub use pages::PageLog;
pub use session::DiscoverySession;
pub use store::{SessionStore, SharedSession};
pub use tools::{
    ClickElementArgs, ClickElementOutput, CompleteDiscoveryArgs, CompleteDiscoveryOutput,
    DiscoveryTools, ExecuteActionsArgs, ExecuteActionsOutput, GetPageInfoArgs, SavePageArgs,
    SavePageOutput, SaveSchemaArgs, SaveSchemaOutput, StartDiscoveryArgs, StartDiscoveryOutput,
    ToolPayload,
};
