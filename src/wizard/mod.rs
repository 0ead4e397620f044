//! Wizard data model and catalog

pub mod catalog;
pub mod types;

pub use catalog::{DATA_SCHEMAS_SUBDIR, STRUCTURES_SUBDIR, WizardCatalog};
pub use types::{
    ClickSpec, Field, FieldType, Interaction, SelectorType, WizardPage, WizardStructure,
    WizardSummary,
};
