//! Command handlers.
//!
//! Each handler receives what it needs from the composition root and
//! returns `anyhow::Result`; typed failures are wrapped `CliError`s so
//! `main` can pick the exit code.

pub mod check;
pub mod remove;

use std::path::Path;

use bgr_core::SourceImage;

use crate::error::CliError;

/// Read an image file and detect its media type.
pub async fn load_image(path: &Path) -> Result<SourceImage, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::Io(format!("Failed to read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(SourceImage::sniffed(file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_load_image_sniffs_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.bin");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nbody").unwrap();

        let image = assert_ok!(load_image(&path).await);
        assert_eq!(image.file_name(), "upload.bin");
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.len(), 12);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = assert_err!(load_image(&dir.path().join("nope.png")).await);
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("nope.png"));
    }
}
