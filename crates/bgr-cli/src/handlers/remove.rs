//! Remove command handler.
//!
//! Uploads one image through the controller, renders progress while the
//! request is in flight, and saves the result next to the input (or into
//! `--output-dir`).

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use bgr_core::{ProcessOutcome, SettingsUpdate};
use tracing::debug;

use super::load_image;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{ProcessingProgress, format_size};
use crate::utils::input;

/// Arguments for the remove command.
pub struct RemoveArgs {
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub settings: SettingsUpdate,
    /// Offer one retry after a retryable failure.
    pub retry_prompt: bool,
}

/// Execute the remove command, prompting on stdin before a retry.
pub async fn execute(ctx: &CliContext, args: RemoveArgs) -> Result<PathBuf> {
    run(ctx, args, input::prompt_confirmation).await
}

/// Execute the remove command with a custom retry confirmation.
///
/// At most one retry is attempted, and only for retryable failures.
pub async fn run<F>(ctx: &CliContext, args: RemoveArgs, mut confirm_retry: F) -> Result<PathBuf>
where
    F: FnMut(&str) -> Result<bool>,
{
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    if !output_dir.is_dir() {
        return Err(CliError::Io(format!(
            "Output directory does not exist: {}",
            output_dir.display()
        ))
        .into());
    }

    let image = load_image(&args.input).await?;
    let controller = ctx.controller();
    if !args.settings.is_empty() {
        controller.update_settings(args.settings);
    }
    controller.upload_image(image);

    let mut retried = false;
    loop {
        let progress = ProcessingProgress::start(controller.subscribe());
        let outcome = controller.process_image().await;
        progress.finish().await;

        match outcome {
            ProcessOutcome::Completed { bytes } => {
                debug!(bytes, "Removal finished");
                break;
            }
            ProcessOutcome::Failed(error) => {
                let offer = args.retry_prompt && !retried && controller.state().can_retry();
                if offer && confirm_retry(&format!("{} Retry?", error.message))? {
                    retried = true;
                    continue;
                }
                return Err(CliError::Api(error).into());
            }
            ProcessOutcome::AlreadyActive => bail!("A removal is already in progress"),
            ProcessOutcome::Superseded => bail!("The image changed while it was being processed"),
        }
    }

    let artifact = controller
        .download_image()
        .ok_or_else(|| anyhow!("No processed image available"))?;
    let path = artifact.save_to(&output_dir).map_err(CliError::from)?;
    println!(
        "Saved {} ({})",
        path.display(),
        format_size(artifact.bytes.len())
    );
    Ok(path)
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
