//! Image pair and processing status tracked by the state machine.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::image::SourceImage;

/// Progress at which the simulated stage switches from uploading to
/// processing.
pub const STAGE_THRESHOLD: u8 = 50;

/// The original image and, once a cycle succeeds, its processed output.
///
/// Invariant: `processed` is never `Some` while `original` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePair {
    pub original: Option<SourceImage>,
    pub processed: Option<Bytes>,
}

/// Stage of a processing cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStage {
    #[default]
    Uploading,
    Processing,
    Complete,
}

impl ProcessingStage {
    /// Stage shown for a simulated progress value while a cycle is active.
    pub const fn for_progress(progress: u8) -> Self {
        if progress < STAGE_THRESHOLD {
            Self::Uploading
        } else {
            Self::Processing
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Uploading => "Uploading",
            Self::Processing => "Removing background",
            Self::Complete => "Complete",
        }
    }
}

/// Status of the current (or last) processing cycle.
///
/// `progress` is a cosmetic estimate in `0..=100`; it is not derived from
/// the actual transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatus {
    #[serde(rename = "isActive")]
    pub active: bool,
    pub progress: u8,
    pub stage: ProcessingStage,
}

impl ProcessingStatus {
    /// Status at the start of a cycle.
    pub const fn started() -> Self {
        Self {
            active: true,
            progress: 0,
            stage: ProcessingStage::Uploading,
        }
    }

    /// Status after a successful cycle.
    pub const fn completed() -> Self {
        Self {
            active: false,
            progress: 100,
            stage: ProcessingStage::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_threshold() {
        assert_eq!(ProcessingStage::for_progress(0), ProcessingStage::Uploading);
        assert_eq!(ProcessingStage::for_progress(40), ProcessingStage::Uploading);
        assert_eq!(ProcessingStage::for_progress(50), ProcessingStage::Processing);
        assert_eq!(ProcessingStage::for_progress(90), ProcessingStage::Processing);
    }

    #[test]
    fn test_initial_status() {
        let status = ProcessingStatus::default();
        assert!(!status.active);
        assert_eq!(status.progress, 0);
        assert_eq!(status.stage, ProcessingStage::Uploading);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_value(ProcessingStatus::completed()).unwrap();
        assert_eq!(json["isActive"], false);
        assert_eq!(json["progress"], 100);
        assert_eq!(json["stage"], "complete");
    }
}
