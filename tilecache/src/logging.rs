//! Logging infrastructure for tilecache.
//!
//! Sets up a `tracing` subscriber that:
//! - Prints to stderr (stdout is left free for tile data)
//! - Optionally also writes to `<log_dir>/tilecache.log`, cleared on start
//! - Is configurable via the RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors raised while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Log directory or file could not be prepared.
    #[error("Failed to prepare log file: {0}")]
    Io(#[from] io::Error),

    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file; `None` logs to stderr only
/// * `default_level` - Filter used when RUST_LOG is not set (e.g. "info")
///
/// # Returns
///
/// LoggingGuard that must be kept alive for file logging to work
pub fn init_logging(
    log_dir: Option<&Path>,
    default_level: &str,
) -> Result<LoggingGuard, LoggingError> {
    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            prepare_log_file(dir, default_log_file())?;

            let file_appender = tracing_appender::rolling::never(dir, default_log_file());
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false); // No ANSI colors in file
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Filter from RUST_LOG, falling back to `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Create `log_dir` if needed and truncate the log file inside it.
pub fn prepare_log_file(log_dir: &Path, log_file: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    "tilecache.log"
}
