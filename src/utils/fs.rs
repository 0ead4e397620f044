//! Filesystem helpers for artifact persistence
//!
//! All wizard artifacts are replaced atomically: content is written to a
//! temp file in the destination directory and renamed over the target.
//! The reaper may tear a session down mid-save, so the on-disk state must
//! always be one of {absent, previous version, new version}.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use uuid::Uuid;

/// Write `content` to `path` atomically (write-temp-then-rename).
///
/// The temp file lives in the same directory as the target so the final
/// rename never crosses a filesystem boundary.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("Path has no parent directory: {}", path.display()))?;
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let tmp = dir.join(format!(".tmp-{}", Uuid::new_v4()));
    fs::write(&tmp, content)
        .await
        .with_context(|| format!("Failed to write temp file {}", tmp.display()))?;

    if let Err(e) = fs::rename(&tmp, path).await {
        // Best-effort cleanup of the orphaned temp file before surfacing.
        let _ = fs::remove_file(&tmp).await;
        return Err(e).with_context(|| format!("Failed to rename temp file into {}", path.display()));
    }
    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically.
pub async fn atomic_write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let content = serde_json::to_vec_pretty(value).context("Failed to serialize JSON artifact")?;
    atomic_write(path, &content).await
}
