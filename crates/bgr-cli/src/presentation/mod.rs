//! Terminal presentation: progress rendering and formatting.
//!
//! Format-only. State transitions belong to the controller.

pub mod format;
pub mod progress;

pub use format::format_size;
pub use progress::{ProcessingProgress, ProgressView, progress_view};
