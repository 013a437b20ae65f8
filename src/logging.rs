//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so logs only go to a file, and only when
//! one was asked for (`--log-file` or CVIEW_LOG_FILE).

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Filter used when RUST_LOG is not set
pub const DEFAULT_FILTER: &str = "cview=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{value}'")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("could not open log file '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install subscriber: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Resolve the log destination: explicit flag first, then CVIEW_LOG_FILE
#[must_use]
pub fn log_file_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os("CVIEW_LOG_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

fn build_filter() -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER).map_err(|source| LoggingError::EnvFilter {
            value: DEFAULT_FILTER.to_string(),
            source,
        }),
    }
}

/// Install the global subscriber writing to `path` (appending).
///
/// Does nothing when `path` is None.
pub fn init(path: Option<&Path>) -> Result<(), LoggingError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::File {
            path: path.to_path_buf(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter()?)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(LoggingError::Subscriber)
}
