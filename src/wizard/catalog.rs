//! Wizard catalog
//!
//! Enumerates finished structure files, pairs each with its user-data
//! schema, and gates availability on validation: a wizard is listed only
//! when its structure passes the meta-schema checks and its schema file
//! parses as draft-07. Broken entries are logged for operators and
//! otherwise treated as absent.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::WizardError;
use crate::schema::{UserDataSchema, pairing_warnings, validate_structure};
use crate::utils::diagnostics::ErrorContext;
use crate::wizard::{WizardStructure, WizardSummary};

/// Subdirectory holding finished wizard structures.
pub const STRUCTURES_SUBDIR: &str = "structure-schemas";
/// Subdirectory holding paired user-data schemas.
pub const DATA_SCHEMAS_SUBDIR: &str = "data-schemas";

#[derive(Debug, Clone)]
pub struct WizardCatalog {
    wizards_dir: PathBuf,
}

impl WizardCatalog {
    #[must_use]
    pub fn new(wizards_dir: impl Into<PathBuf>) -> Self {
        Self {
            wizards_dir: wizards_dir.into(),
        }
    }

    #[must_use]
    pub fn wizards_dir(&self) -> &Path {
        &self.wizards_dir
    }

    #[must_use]
    pub fn structure_path(&self, wizard_id: &str) -> PathBuf {
        self.wizards_dir
            .join(STRUCTURES_SUBDIR)
            .join(format!("{wizard_id}.json"))
    }

    #[must_use]
    pub fn schema_path(&self, wizard_id: &str) -> PathBuf {
        self.wizards_dir
            .join(DATA_SCHEMAS_SUBDIR)
            .join(format!("{wizard_id}-schema.json"))
    }

    /// Summaries of every available wizard, sorted by id.
    ///
    /// Parsing is lazy: files are read one at a time and unavailable
    /// entries are skipped with an operator diagnostic.
    pub async fn list(&self) -> Result<Vec<WizardSummary>, WizardError> {
        let dir = self.wizards_dir.join(STRUCTURES_SUBDIR);
        let mut summaries = Vec::new();

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // An empty catalog is a valid catalog.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(summaries),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(wizard_id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
            else {
                continue;
            };
            // Skip in-flight partials that predate the dedicated location.
            if wizard_id.starts_with('_') {
                continue;
            }
            match self.load(&wizard_id).await {
                Ok((structure, schema)) => {
                    summaries.push(WizardSummary {
                        wizard_id: structure.wizard_id.clone(),
                        name: structure.name.clone(),
                        url: structure.url.clone(),
                        total_pages: structure.total_pages,
                        discovered_at: structure.discovered_at,
                        required_fields: schema.required().iter().map(|s| s.to_string()).collect(),
                    });
                }
                Err(e) => {
                    debug!(wizard_id, error = %e, "skipping unavailable wizard");
                }
            }
        }

        summaries.sort_by(|a, b| a.wizard_id.cmp(&b.wizard_id));
        Ok(summaries)
    }

    /// Load the full structure + schema pair for one wizard.
    ///
    /// Any availability failure collapses to `wizard_not_found` for the
    /// caller; the underlying cause is logged for operators.
    pub async fn load(
        &self,
        wizard_id: &str,
    ) -> Result<(WizardStructure, UserDataSchema), WizardError> {
        let structure_path = self.structure_path(wizard_id);
        let structure = match self.read_structure(&structure_path).await {
            Ok(s) => s,
            Err(reason) => return Err(self.not_found(wizard_id, &reason)),
        };

        let report = validate_structure(&structure);
        if !report.is_complete {
            return Err(self.not_found(
                wizard_id,
                &format!("structure failed validation: {}", report.warnings.join("; ")),
            ));
        }

        let schema_path = self.schema_path(wizard_id);
        let schema = match UserDataSchema::load(&schema_path).await {
            Ok(s) => s,
            Err(e) => return Err(self.not_found(wizard_id, &e.to_string())),
        };

        let pairing = pairing_warnings(&structure, &schema);
        if !pairing.is_empty() {
            return Err(self.not_found(
                wizard_id,
                &format!("structure/schema mismatch: {}", pairing.join("; ")),
            ));
        }

        Ok((structure, schema))
    }

    async fn read_structure(&self, path: &Path) -> Result<WizardStructure, String> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("{} is not valid JSON: {e}", path.display()))?;
        serde_json::from_value(value)
            .map_err(|e| format!("{} is not a wizard structure: {e}", path.display()))
    }

    fn not_found(&self, wizard_id: &str, reason: &str) -> WizardError {
        warn!(
            wizard_id,
            "{}",
            ErrorContext::new("Load wizard")
                .detail(format!("wizard_id: {wizard_id}"))
                .detail(reason.to_string())
                .suggest("Run discovery for this wizard, or repair the files listed above")
                .suggest(format!(
                    "Expected files: {} and {}",
                    self.structure_path(wizard_id).display(),
                    self.schema_path(wizard_id).display()
                ))
                .build()
        );
        WizardError::WizardNotFound {
            wizard_id: wizard_id.to_string(),
        }
    }
}
