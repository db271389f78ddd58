//! CLI-specific error types and exit code mapping.

use bgr_client::ClientError;
use bgr_core::{ApiError, ApiErrorKind};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A processing or validation failure reported by the core.
    #[error("{}", .0.message)]
    Api(ApiError),

    /// Argument error not caught by the parser.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Follows sysexits.h where a category fits, 1 otherwise.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Api(err) => match err.kind {
                ApiErrorKind::FileTooLarge | ApiErrorKind::UnsupportedFormat => 65, // EX_DATAERR
                ApiErrorKind::InsufficientCredits => 69, // EX_UNAVAILABLE
                ApiErrorKind::NetworkError | ApiErrorKind::ProcessingError => 75, // EX_TEMPFAIL
                ApiErrorKind::InvalidApiKey => 77, // EX_NOPERM
            },
            Self::Arguments(_) => 2,
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error surfaced from a handler.
///
/// Errors that are not a [`CliError`] exit with 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_map_by_kind() {
        assert_eq!(CliError::from(ApiError::file_too_large()).exit_code(), 65);
        assert_eq!(CliError::from(ApiError::unsupported_format()).exit_code(), 65);
        assert_eq!(CliError::from(ApiError::timeout()).exit_code(), 75);
        assert_eq!(
            CliError::from(ApiError::new(ApiErrorKind::InvalidApiKey, "nope")).exit_code(),
            77
        );
        assert_eq!(
            CliError::from(ApiError::new(ApiErrorKind::InsufficientCredits, "broke")).exit_code(),
            69
        );
    }

    #[test]
    fn test_api_error_displays_message_only() {
        let err = CliError::from(ApiError::file_too_large());
        assert_eq!(err.to_string(), ApiError::file_too_large().message);
    }

    #[test]
    fn test_exit_code_for_anyhow() {
        let err = anyhow::Error::new(CliError::Config("missing key".into()));
        assert_eq!(exit_code_for(&err), 78);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CliError::from(io);
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("gone"));
    }
}
