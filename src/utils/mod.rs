//! Shared constants and small helpers

pub mod constants;
pub mod diagnostics;
pub mod fs;

pub use constants::*;
pub use fs::{atomic_write, atomic_write_json};

use std::sync::LazyLock;

use regex::Regex;

static WIZARD_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-z0-9-]+$").unwrap_or_else(|e| panic!("wizard id regex is valid: {e}"))
});

/// Whether `id` is a well-formed wizard slug (lowercase, digits, hyphens).
#[must_use]
pub fn is_valid_wizard_id(id: &str) -> bool {
    !id.is_empty() && WIZARD_ID_RE.is_match(id)
}
