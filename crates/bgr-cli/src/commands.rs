//! Subcommand definitions.

use std::path::PathBuf;

use bgr_client::API_KEY_ENV;
use bgr_core::{ForegroundType, OutputFormat, OutputSize};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Remove the background from an image and save the result
    Remove {
        /// Image to process (JPEG, PNG or WebP, at most 12 MiB)
        input: PathBuf,

        /// Directory to write the result into [default: the input's directory]
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Output resolution: auto, preview or full
        #[arg(long, default_value = "auto")]
        size: OutputSize,

        /// Output format requested from the service: png or jpg
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Foreground hint: auto, person or product
        #[arg(long = "type")]
        foreground_type: Option<ForegroundType>,

        /// API key for the removal service
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,

        /// Override the API endpoint
        #[arg(long, env = "BGR_ENDPOINT")]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long = "timeout-secs", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: u64,

        /// Don't offer to retry after a retryable failure
        #[arg(long = "no-retry-prompt")]
        no_retry_prompt: bool,
    },

    /// Check whether an image would be accepted, without uploading it
    Check {
        /// Image to check
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_remove_defaults() {
        let cli = Cli::parse_from(["bgr", "remove", "cat.png"]);
        let Commands::Remove {
            input,
            output_dir,
            size,
            format,
            foreground_type,
            timeout_secs,
            no_retry_prompt,
            ..
        } = cli.command
        else {
            panic!("expected remove");
        };
        assert_eq!(input, PathBuf::from("cat.png"));
        assert!(output_dir.is_none());
        assert_eq!(size, OutputSize::Auto);
        assert!(format.is_none());
        assert!(foreground_type.is_none());
        assert_eq!(timeout_secs, 30);
        assert!(!no_retry_prompt);
    }

    #[test]
    fn test_remove_all_flags() {
        let cli = Cli::parse_from([
            "bgr",
            "remove",
            "cat.png",
            "-o",
            "/tmp/out",
            "--size",
            "full",
            "--format",
            "jpg",
            "--type",
            "person",
            "--api-key",
            "k",
            "--endpoint",
            "http://localhost:8080/removebg",
            "--timeout-secs",
            "5",
            "--no-retry-prompt",
        ]);
        let Commands::Remove {
            output_dir,
            size,
            format,
            foreground_type,
            api_key,
            endpoint,
            timeout_secs,
            no_retry_prompt,
            ..
        } = cli.command
        else {
            panic!("expected remove");
        };
        assert_eq!(output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(size, OutputSize::Full);
        assert_eq!(format, Some(OutputFormat::Jpg));
        assert_eq!(foreground_type, Some(ForegroundType::Person));
        assert_eq!(api_key.as_deref(), Some("k"));
        assert_eq!(endpoint.as_deref(), Some("http://localhost:8080/removebg"));
        assert_eq!(timeout_secs, 5);
        assert!(no_retry_prompt);
    }

    #[test]
    fn test_invalid_setting_rejected() {
        assert!(Cli::try_parse_from(["bgr", "remove", "a.png", "--size", "huge"]).is_err());
        assert!(Cli::try_parse_from(["bgr", "remove", "a.png", "--timeout-secs", "0"]).is_err());
    }
}
