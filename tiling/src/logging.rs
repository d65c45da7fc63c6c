//! Tracing subscriber setup.
//!
//! Logs go to stderr through a `fmt` layer. When a log file is configured, a
//! second non-ANSI layer writes to it through a non-blocking appender; keep
//! the returned [`WorkerGuard`] alive until exit or buffered lines are lost.
//!
//! `RUST_LOG` overrides the configured level.

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `tiling=debug`.
    pub level: String,
    /// Optional log file, appended to.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Build the filter, preferring `RUST_LOG` when it is set and valid.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| LoggingError::InvalidLevel {
                level: self.level.clone(),
                reason: e.to_string(),
            })
    }
}

/// Errors installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level {level:?}: {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("log file path has no file name: {}", .0.display())]
    InvalidFile(PathBuf),

    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialised,
}

/// Install the global tracing subscriber.
///
/// Returns the file writer guard when a log file is configured.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = config.env_filter()?;
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    match &config.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| LoggingError::InvalidFile(path.clone()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);

            Registry::default()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|_| LoggingError::AlreadyInitialised)?;
            Ok(Some(guard))
        }
        None => {
            Registry::default()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|_| LoggingError::AlreadyInitialised)?;
            Ok(None)
        }
    }
}
