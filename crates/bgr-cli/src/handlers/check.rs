//! Check command handler: local validation only, nothing is uploaded.

use std::path::Path;

use anyhow::Result;

use super::load_image;
use crate::error::CliError;
use crate::presentation::format_size;

/// Execute the check command.
///
/// Prints the detected media type and size, then fails with the
/// validation error if the image would be rejected.
pub async fn execute(input: &Path) -> Result<()> {
    let image = load_image(input).await?;
    println!(
        "{}: {}, {}",
        image.file_name(),
        image.media_type(),
        format_size(image.len())
    );

    image.validate().map_err(CliError::from)?;
    println!("OK: ready for background removal");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit_code_for;

    #[tokio::test]
    async fn test_accepts_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 0]).unwrap();

        assert!(execute(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_gif_with_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        std::fs::write(&path, b"GIF89a.....").unwrap();

        let err = execute(&path).await.unwrap_err();
        assert_eq!(exit_code_for(&err), 65);
        assert_eq!(err.to_string(), "Supported formats: JPEG, PNG, WEBP");
    }
}
