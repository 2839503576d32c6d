//! Progress export as a downloadable JSON file.

use std::path::{Path, PathBuf};

use mjtutor_core::{ProgressRecord, Time};
use tokio::fs;

/// Errors while exporting progress.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Record could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named, pretty-printed snapshot of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, e.g. `mahjong-progress-2024-05-01.json`
    pub file_name: String,

    /// Pretty-printed JSON
    pub contents: String,
}

impl ExportArtifact {
    /// Build an artifact for `record`, dated by `now`.
    pub fn from_record(record: &ProgressRecord, prefix: &str, now: Time) -> Result<Self, ExportError> {
        Ok(Self {
            file_name: format!("{}-{}.json", prefix, now.format("%Y-%m-%d")),
            contents: serde_json::to_string_pretty(record)?,
        })
    }

    /// Write the artifact into `dir` and return the full path.
    pub async fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.contents.as_bytes()).await?;
        Ok(path)
    }
}
