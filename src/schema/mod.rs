//! Schema validation: user-data contracts and the wizard-structure
//! meta-schema.

pub mod structure;
pub mod user_data;

pub use structure::{META_SCHEMA_SOURCE, StructureReport, validate_structure};
pub use user_data::{DataReport, InvalidField, MissingField, UserDataSchema, pairing_warnings};
