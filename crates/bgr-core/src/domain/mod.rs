//! Domain types for the removal workflow.
//!
//! These are pure types with no infrastructure dependencies; the
//! controller and the HTTP client both build on them.

mod artifact;
mod image;
mod settings;
mod status;

pub use artifact::{ARTIFACT_MEDIA_TYPE, DownloadArtifact};
pub use image::{
    MAX_FILE_SIZE, SUPPORTED_MEDIA_TYPES, SourceImage, UNKNOWN_MEDIA_TYPE, sniff_media_type,
};
pub use settings::{
    ForegroundType, OutputFormat, OutputSize, ParseSettingError, RemovalOptions, Settings,
    SettingsUpdate,
};
pub use status::{ImagePair, ProcessingStage, ProcessingStatus, STAGE_THRESHOLD};
