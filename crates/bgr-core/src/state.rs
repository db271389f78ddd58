//! Application state and its pure transition function.
//!
//! Every mutation goes through [`reduce`], one arm per [`AppAction`], so
//! adding an action forces every transition to be considered.
//!
//! Actions produced by an in-flight request carry the cycle they belong to.
//! Uploading, resetting or starting again moves `cycle` on, and anything
//! still tagged with the old value is dropped.

use bytes::Bytes;

use crate::domain::{
    ImagePair, ProcessingStage, ProcessingStatus, Settings, SettingsUpdate, SourceImage,
};
use crate::error::ApiError;

/// Observable application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub images: ImagePair,
    pub processing: ProcessingStatus,
    pub settings: Settings,
    pub error: Option<ApiError>,
    /// Identity of the current processing cycle.
    pub cycle: u64,
}

/// Coarse phase derived from [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No image selected.
    Idle,
    /// Image selected, nothing processed yet.
    Loaded,
    /// A request is in flight.
    Processing,
    /// The processed image is available.
    Done,
}

impl AppState {
    pub const fn phase(&self) -> AppPhase {
        if self.processing.active {
            AppPhase::Processing
        } else if self.images.processed.is_some() {
            AppPhase::Done
        } else if self.images.original.is_some() {
            AppPhase::Loaded
        } else {
            AppPhase::Idle
        }
    }

    /// Whether starting a cycle would issue a request.
    pub const fn can_process(&self) -> bool {
        self.images.original.is_some() && !self.processing.active
    }

    /// Whether the current error should be offered as "Retry".
    pub fn can_retry(&self) -> bool {
        self.can_process() && self.error.as_ref().is_some_and(|error| error.retryable)
    }

    /// Whether `cycle` is the cycle currently in flight.
    pub const fn is_running(&self, cycle: u64) -> bool {
        self.processing.active && self.cycle == cycle
    }
}

/// State transitions.
#[derive(Debug, Clone)]
pub enum AppAction {
    /// A new original was selected.
    UploadImage(SourceImage),
    /// A request is about to be issued. Opens a new cycle.
    StartProcessing,
    /// Simulated progress of `cycle` advanced to `progress`.
    UpdateProgress { cycle: u64, progress: u8 },
    /// The request issued for `cycle` succeeded with these bytes.
    ProcessingComplete { cycle: u64, bytes: Bytes },
    /// The request issued for `cycle` failed.
    ProcessingFailed { cycle: u64, error: ApiError },
    /// Processing was refused before any request (no image, local
    /// validation).
    Rejected(ApiError),
    /// Merge a partial settings update.
    UpdateSettings(SettingsUpdate),
    /// Return to the initial state, keeping settings.
    Reset,
    /// Dismiss the current error.
    ClearError,
}

/// Apply `action` to `state`.
pub fn reduce(state: AppState, action: AppAction) -> AppState {
    match action {
        AppAction::UploadImage(image) => AppState {
            images: ImagePair {
                original: Some(image),
                processed: None,
            },
            processing: ProcessingStatus::default(),
            error: None,
            cycle: state.cycle.wrapping_add(1),
            ..state
        },

        AppAction::StartProcessing => AppState {
            processing: ProcessingStatus::started(),
            error: None,
            cycle: state.cycle.wrapping_add(1),
            ..state
        },

        AppAction::UpdateProgress { cycle, progress } => {
            if !state.is_running(cycle) {
                return state;
            }
            let progress = progress.min(100).max(state.processing.progress);
            AppState {
                processing: ProcessingStatus {
                    active: true,
                    progress,
                    stage: ProcessingStage::for_progress(progress),
                },
                ..state
            }
        }

        AppAction::ProcessingComplete { cycle, bytes } => {
            if !state.is_running(cycle) || state.images.original.is_none() {
                return state;
            }
            AppState {
                images: ImagePair {
                    processed: Some(bytes),
                    ..state.images
                },
                processing: ProcessingStatus::completed(),
                error: None,
                ..state
            }
        }

        AppAction::ProcessingFailed { cycle, error } => {
            if !state.is_running(cycle) {
                return state;
            }
            AppState {
                processing: ProcessingStatus {
                    active: false,
                    ..state.processing
                },
                error: Some(error),
                ..state
            }
        }

        AppAction::Rejected(error) => AppState {
            error: Some(error),
            ..state
        },

        AppAction::UpdateSettings(update) => {
            let mut settings = state.settings;
            settings.merge(&update);
            AppState { settings, ..state }
        }

        AppAction::Reset => AppState {
            settings: state.settings,
            cycle: state.cycle.wrapping_add(1),
            ..AppState::default()
        },

        AppAction::ClearError => AppState {
            error: None,
            ..state
        },
    }
}
