//! Source images and local validation.

use bytes::Bytes;

use crate::error::{ApiError, ApiResult};

/// Largest file the removal service accepts (12 MiB).
pub const MAX_FILE_SIZE: usize = 12 * 1024 * 1024;

/// Media types the removal service accepts.
pub const SUPPORTED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Media type reported when neither content nor extension is recognized.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// An image selected by the user.
///
/// The bytes are reference counted, so cloning a `SourceImage` into an
/// in-flight request shares the buffer with the state machine instead of
/// copying it. The buffer is released when the last handle is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    file_name: String,
    media_type: String,
    bytes: Bytes,
}

impl SourceImage {
    /// Create an image with an explicitly declared media type.
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Create an image whose media type is detected from its content,
    /// falling back to the file extension.
    pub fn sniffed(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let bytes = bytes.into();
        let media_type = sniff_media_type(&bytes, &file_name).to_string();
        Self {
            file_name,
            media_type,
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_supported_type(&self) -> bool {
        SUPPORTED_MEDIA_TYPES.contains(&self.media_type.as_str())
    }

    /// Check the image against the service limits without touching the
    /// network. Size is checked before media type.
    pub fn validate(&self) -> ApiResult<()> {
        if self.len() > MAX_FILE_SIZE {
            return Err(ApiError::file_too_large());
        }
        if !self.is_supported_type() {
            return Err(ApiError::unsupported_format());
        }
        Ok(())
    }
}

/// Detect the media type of an image.
///
/// Magic bytes win over the extension; a `.png` that is really a GIF is
/// reported as `image/gif` and will fail validation.
pub fn sniff_media_type(bytes: &[u8], file_name: &str) -> &'static str {
    if let Some(detected) = sniff_magic(bytes) {
        return detected;
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg" | "jpe") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => UNKNOWN_MEDIA_TYPE,
    }
}

fn sniff_magic(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(PNG) {
        Some("image/png")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}
