//! Downloadable result of a processing cycle.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Media type of every download artifact.
///
/// The service answers with PNG regardless of the requested `format`
/// unless the account enables other containers, so artifacts are always
/// labelled as PNG.
pub const ARTIFACT_MEDIA_TYPE: &str = "image/png";

/// Processed bytes packaged for saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Bytes,
}

impl DownloadArtifact {
    /// Package processed bytes, naming the file after `at`.
    pub fn png(bytes: Bytes, at: DateTime<Utc>) -> Self {
        Self {
            file_name: format!("background-removed-{}.png", at.timestamp_millis()),
            media_type: ARTIFACT_MEDIA_TYPE,
            bytes,
        }
    }

    /// Write the artifact into `dir` and return the full path.
    pub fn save_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
