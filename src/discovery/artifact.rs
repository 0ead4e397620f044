//! Incremental artifact writer
//!
//! Persists a best-effort partial structure after every page save and
//! promotes it to a final file on completion. All writes are atomic
//! (temp-then-rename) so a reaper teardown overlapping a save leaves the
//! disk in a whole state. Partials survive crashes for recovery.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::error::WizardError;
use crate::utils::atomic_write_json;
use crate::wizard::{DATA_SCHEMAS_SUBDIR, STRUCTURES_SUBDIR, WizardStructure};

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    wizards_dir: PathBuf,
}

impl ArtifactStore {
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
    pub fn partial_path(&self, session_id: &str) -> PathBuf {
        self.wizards_dir.join(format!("_partial_{session_id}.json"))
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

    /// Replace the partial artifact for a session.
    pub async fn write_partial(
        &self,
        session_id: &str,
        structure: &WizardStructure,
    ) -> Result<PathBuf, WizardError> {
        let path = self.partial_path(session_id);
        let value = serde_json::to_value(structure)?;
        atomic_write_json(&path, &value).await?;
        debug!(session_id, path = %path.display(), "partial artifact written");
        Ok(path)
    }

    /// Delete the partial after successful completion. Missing is fine.
    pub async fn remove_partial(&self, session_id: &str) -> Result<(), WizardError> {
        let path = self.partial_path(session_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn final_exists(&self, wizard_id: &str) -> bool {
        fs::try_exists(self.structure_path(wizard_id))
            .await
            .unwrap_or(false)
    }

    /// Write the finished structure file.
    pub async fn write_final(&self, structure: &WizardStructure) -> Result<PathBuf, WizardError> {
        let path = self.structure_path(&structure.wizard_id);
        let value = serde_json::to_value(structure)?;
        atomic_write_json(&path, &value).await?;
        info!(wizard_id = structure.wizard_id, path = %path.display(), "wizard structure saved");
        Ok(path)
    }

    /// Read a finished structure back, if present and parseable.
    pub async fn read_final(&self, wizard_id: &str) -> Option<WizardStructure> {
        let content = fs::read_to_string(self.structure_path(wizard_id)).await.ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Write the paired user-data schema file.
    pub async fn write_schema(
        &self,
        wizard_id: &str,
        schema: &Value,
    ) -> Result<PathBuf, WizardError> {
        let path = self.schema_path(wizard_id);
        atomic_write_json(&path, schema).await?;
        info!(wizard_id, path = %path.display(), "user-data schema saved");
        Ok(path)
    }
}
