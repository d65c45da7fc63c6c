//! CLI error type.

use std::fmt;

use tiling::config::ConfigError;
use tiling::logging::LoggingError;
use tiling::{CodecError, TilingError};

/// Errors surfaced to the user by the `tiling` binary.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file problem.
    Config(String),
    /// Invalid or conflicting command-line arguments.
    Args(String),
    /// Logging could not be set up.
    Logging(String),
    /// Tile directory expansion failed.
    Glob(String),
    /// A tiling operation failed.
    Tiling(TilingError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Args(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Glob(msg) => write!(f, "Failed to list tiles: {}", msg),
            CliError::Tiling(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Tiling(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TilingError> for CliError {
    fn from(e: TilingError) -> Self {
        CliError::Tiling(e)
    }
}

impl From<CodecError> for CliError {
    fn from(e: CodecError) -> Self {
        CliError::Tiling(TilingError::Codec(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e.to_string())
    }
}
