#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod controller;
pub mod domain;
pub mod error;
pub mod ports;
pub mod state;

// Re-export commonly used types for convenience
pub use controller::{AppController, ControllerConfig, ProcessOutcome};
pub use domain::{
    ARTIFACT_MEDIA_TYPE, DownloadArtifact, ForegroundType, ImagePair, MAX_FILE_SIZE,
    OutputFormat, OutputSize, ParseSettingError, ProcessingStage, ProcessingStatus,
    RemovalOptions, STAGE_THRESHOLD, SUPPORTED_MEDIA_TYPES, Settings, SettingsUpdate,
    SourceImage, UNKNOWN_MEDIA_TYPE, sniff_media_type,
};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use ports::RemovalPort;
pub use state::{AppAction, AppPhase, AppState, reduce};

