//! Processing-cycle controller.
//!
//! `AppController` owns the [`AppState`] inside a `watch` channel so any
//! number of presentation adapters can observe it, and exposes one method
//! per user intent. A processing cycle runs two cooperating futures under a
//! single cancellation token: the removal request and a cosmetic progress
//! simulation. The token is revoked before the terminal transition is
//! published, and every progress tick re-checks it inside the state update,
//! so no tick can land after the cycle resolved.
//!
//! Only one request is ever outstanding. Resetting or uploading while a
//! request is in flight abandons its cycle: the state moves on at once, the
//! late result is discarded, and a new cycle can start once the old request
//! has returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{DownloadArtifact, RemovalOptions, SettingsUpdate, SourceImage};
use crate::error::{ApiError, ApiErrorKind};
use crate::ports::RemovalPort;
use crate::state::{AppAction, AppState, reduce};

/// Timing of the simulated progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Interval between simulated progress ticks.
    pub tick_interval: Duration,
    /// Progress added per tick.
    pub progress_step: u8,
    /// Simulated progress never exceeds this value; only a successful
    /// response moves progress to 100.
    pub progress_cap: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            progress_step: 10,
            progress_cap: 90,
        }
    }
}

/// How a call to [`AppController::process_image`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The processed image is stored in state.
    Completed {
        /// Size of the processed image.
        bytes: usize,
    },
    /// The error is stored in state.
    Failed(ApiError),
    /// Another request was already in flight; nothing changed.
    AlreadyActive,
    /// The image was replaced or the app reset while the request was in
    /// flight; the result was discarded.
    Superseded,
}

/// Result of the atomic admission check at the start of a cycle.
enum Admission {
    Started {
        cycle: u64,
        image: SourceImage,
        options: RemovalOptions,
    },
    Busy,
    Rejected(ApiError),
}

/// Owns the application state and drives the removal port.
pub struct AppController {
    state: watch::Sender<AppState>,
    remover: Arc<dyn RemovalPort>,
    config: ControllerConfig,
    /// Set while a request is outstanding, even if its cycle was abandoned.
    in_flight: AtomicBool,
}

impl AppController {
    /// Create a controller with default progress timing.
    pub fn new(remover: Arc<dyn RemovalPort>) -> Self {
        Self::with_config(remover, ControllerConfig::default())
    }

    pub fn with_config(remover: Arc<dyn RemovalPort>, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            state,
            remover,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Select a new original image. Clears any processed result and error.
    pub fn upload_image(&self, image: SourceImage) {
        info!(
            file = image.file_name(),
            media_type = image.media_type(),
            size = image.len(),
            "Image selected"
        );
        self.dispatch(AppAction::UploadImage(image));
    }

    /// Run one processing cycle for the current original.
    ///
    /// Fails fast without a request when no image is selected or the image
    /// violates the service limits. A call made while another request is in
    /// flight is a no-op.
    pub async fn process_image(&self) -> ProcessOutcome {
        let (cycle, image, options) = match self.admit() {
            Admission::Started {
                cycle,
                image,
                options,
            } => (cycle, image, options),
            Admission::Busy => {
                debug!("Request already in flight, ignoring");
                return ProcessOutcome::AlreadyActive;
            }
            Admission::Rejected(error) => {
                warn!(kind = %error.kind, "{}", error.message);
                return ProcessOutcome::Failed(error);
            }
        };

        info!(
            cycle,
            file = image.file_name(),
            size = %options.size,
            "Processing started"
        );

        let guard = CycleGuard::new(&self.state, &self.in_flight, cycle);
        let token = CancellationToken::new();
        let request = async {
            let result = self.remover.remove_background(&image, &options).await;
            token.cancel();
            result
        };
        let (result, ()) = tokio::join!(request, self.simulate_progress(&token, cycle));

        match result {
            Ok(bytes) => {
                let size = bytes.len();
                if !guard.finish(AppAction::ProcessingComplete { cycle, bytes }) {
                    info!(cycle, "Discarding result of abandoned cycle");
                    return ProcessOutcome::Superseded;
                }
                info!(cycle, bytes = size, "Processing complete");
                ProcessOutcome::Completed { bytes: size }
            }
            Err(error) => {
                let action = AppAction::ProcessingFailed {
                    cycle,
                    error: error.clone(),
                };
                if !guard.finish(action) {
                    info!(cycle, kind = %error.kind, "Discarding failure of abandoned cycle");
                    return ProcessOutcome::Superseded;
                }
                warn!(
                    cycle,
                    kind = %error.kind,
                    status = ?error.status_code,
                    retryable = error.retryable,
                    "Processing failed: {}",
                    error.message
                );
                ProcessOutcome::Failed(error)
            }
        }
    }

    /// Package the processed image for saving, if there is one.
    pub fn download_image(&self) -> Option<DownloadArtifact> {
        let processed = self.state.borrow().images.processed.clone()?;
        let artifact = DownloadArtifact::png(processed, Utc::now());
        info!(
            file = %artifact.file_name,
            size = artifact.bytes.len(),
            "Prepared download"
        );
        Some(artifact)
    }

    /// Clear images, processing status and error. Settings are kept.
    pub fn reset_app(&self) {
        debug!("Resetting application state");
        self.dispatch(AppAction::Reset);
    }

    pub fn update_settings(&self, update: SettingsUpdate) {
        debug!(?update, "Updating settings");
        self.dispatch(AppAction::UpdateSettings(update));
    }

    /// Dismiss the current error.
    pub fn clear_error(&self) {
        self.dispatch(AppAction::ClearError);
    }

    fn dispatch(&self, action: AppAction) {
        self.state.send_modify(|state| apply(state, action));
    }

    /// Check preconditions and enter the processing state in one step, so
    /// two concurrent callers cannot both start a request.
    fn admit(&self) -> Admission {
        let mut admission = Admission::Busy;
        self.state.send_if_modified(|state| {
            if state.processing.active || self.in_flight.load(Ordering::Acquire) {
                return false;
            }

            let checked = state
                .images
                .original
                .clone()
                .ok_or_else(ApiError::no_image_selected)
                .and_then(|image| image.validate().map(|()| image));

            match checked {
                Ok(image) => {
                    let options = RemovalOptions::from(&state.settings);
                    self.in_flight.store(true, Ordering::Release);
                    apply(state, AppAction::StartProcessing);
                    admission = Admission::Started {
                        cycle: state.cycle,
                        image,
                        options,
                    };
                }
                Err(error) => {
                    admission = Admission::Rejected(error.clone());
                    apply(state, AppAction::Rejected(error));
                }
            }
            true
        });
        admission
    }

    async fn simulate_progress(&self, token: &CancellationToken, cycle: u64) {
        let period = self.config.tick_interval;
        let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticks.tick() => self.advance_progress(token, cycle),
            }
        }
    }

    fn advance_progress(&self, token: &CancellationToken, cycle: u64) {
        let ControllerConfig {
            progress_step,
            progress_cap,
            ..
        } = self.config;

        let mut reached = None;
        self.state.send_if_modified(|state| {
            if token.is_cancelled() || !state.is_running(cycle) {
                return false;
            }
            let current = state.processing.progress;
            let next = current.saturating_add(progress_step).min(progress_cap);
            if next <= current {
                return false;
            }
            apply(state, AppAction::UpdateProgress {
                cycle,
                progress: next,
            });
            reached = Some(state.processing.progress);
            true
        });

        if let Some(progress) = reached {
            debug!(cycle, progress, "Simulated progress advanced");
        }
    }
}

fn apply(state: &mut AppState, action: AppAction) {
    let current = std::mem::take(state);
    *state = reduce(current, action);
}

/// Publishes at most one terminal transition for a cycle and releases the
/// in-flight slot.
///
/// If the cycle future is dropped before the request resolves, the guard
/// records a failure so the state does not stay active forever. Transitions
/// for a cycle that is no longer running are discarded.
struct CycleGuard<'a> {
    state: &'a watch::Sender<AppState>,
    in_flight: &'a AtomicBool,
    cycle: u64,
    finished: bool,
}

impl<'a> CycleGuard<'a> {
    const fn new(state: &'a watch::Sender<AppState>, in_flight: &'a AtomicBool, cycle: u64) -> Self {
        Self {
            state,
            in_flight,
            cycle,
            finished: false,
        }
    }

    /// Apply `action` if the cycle is still current. Returns whether it was.
    fn finish(mut self, action: AppAction) -> bool {
        self.finished = true;
        self.publish(action)
    }

    fn publish(&self, action: AppAction) -> bool {
        let cycle = self.cycle;
        self.state.send_if_modified(|state| {
            // Released under the state lock so a caller that sees the
            // terminal state can start the next cycle immediately.
            self.in_flight.store(false, Ordering::Release);
            if !state.is_running(cycle) {
                return false;
            }
            apply(state, action);
            true
        })
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!(cycle = self.cycle, "Processing cycle dropped before the request resolved");
        let error = ApiError::new(ApiErrorKind::ProcessingError, "Processing was cancelled");
        self.publish(AppAction::ProcessingFailed {
            cycle: self.cycle,
            error,
        });
    }
}
