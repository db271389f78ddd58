//! Progress bar driven by the controller's state channel.

use bgr_core::AppState;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What the bar shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub position: u64,
    pub message: &'static str,
}

pub fn progress_view(state: &AppState) -> ProgressView {
    ProgressView {
        position: u64::from(state.processing.progress),
        message: state.processing.stage.label(),
    }
}

/// A progress bar that follows the state channel until finished.
pub struct ProcessingProgress {
    bar: ProgressBar,
    task: JoinHandle<()>,
}

impl ProcessingProgress {
    /// Start rendering. Draws to stderr, hidden when stderr is not a terminal.
    pub fn start(rx: watch::Receiver<AppState>) -> Self {
        Self::with_bar(rx, Self::create_bar())
    }

    /// Start rendering onto an existing bar.
    pub fn with_bar(mut rx: watch::Receiver<AppState>, bar: ProgressBar) -> Self {
        let handle = bar.clone();
        let task = tokio::spawn(async move {
            loop {
                let view = progress_view(&rx.borrow_and_update());
                handle.set_position(view.position);
                handle.set_message(view.message);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });
        Self { bar, task }
    }

    fn create_bar() -> ProgressBar {
        let bar = ProgressBar::new(100);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("█▓░"));
        }
        bar
    }

    /// Stop following the channel and clear the bar.
    ///
    /// Returns the last position drawn.
    pub async fn finish(self) -> u64 {
        self.task.abort();
        let _ = self.task.await;
        let position = self.bar.position();
        self.bar.finish_and_clear();
        position
    }
}
