//! CLI entry point - the composition root.
//!
//! Parses arguments, initialises logging and dispatches to handlers. Only
//! `bootstrap` constructs the HTTP client.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use bgr_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};
use bgr_core::SettingsUpdate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    // --verbose wins over RUST_LOG; otherwise RUST_LOG, then warnings only
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Remove {
            input,
            output_dir,
            size,
            format,
            foreground_type,
            api_key,
            endpoint,
            timeout_secs,
            no_retry_prompt,
        } => {
            let config = CliConfig {
                api_key,
                endpoint,
                timeout: Some(Duration::from_secs(timeout_secs)),
            };
            let ctx = bootstrap(&config)?;
            let args = handlers::remove::RemoveArgs {
                input,
                output_dir,
                settings: SettingsUpdate {
                    output_format: format,
                    size: Some(size),
                    foreground_type: foreground_type.map(Some),
                },
                retry_prompt: !no_retry_prompt,
            };
            handlers::remove::execute(&ctx, args).await?;
        }
        Commands::Check { input } => {
            handlers::check::execute(&input).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(u8::try_from(exit_code_for(&err)).unwrap_or(1))
        }
    }
}
