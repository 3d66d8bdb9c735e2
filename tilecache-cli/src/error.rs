//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::io;
use std::process;

use tilecache::cache::TileCacheError;
use tilecache::config::ConfigFileError;
use tilecache::coord::TileKey;

/// Exit code used when a requested tile is not cached.
pub const EXIT_NOT_CACHED: i32 = 2;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Tile cache operation failed
    Cache(TileCacheError),
    /// Failed to read the payload to store
    ReadInput { path: String, error: io::Error },
    /// Failed to write a retrieved tile
    WriteOutput { path: String, error: io::Error },
    /// Requested tile is not in the cache
    NotCached(TileKey),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotCached(_) => EXIT_NOT_CACHED,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Cache(e) = self {
            if e.io_error().map(|io| io.kind()) == Some(io::ErrorKind::PermissionDenied) {
                eprintln!();
                eprintln!("Check that the cache directory is writable by the current user,");
                eprintln!("or point --root at a different directory.");
            }
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Cache(e) => write!(f, "Tile cache error: {}", e),
            CliError::ReadInput { path, error } => {
                write!(f, "Failed to read input '{}': {}", path, error)
            }
            CliError::WriteOutput { path, error } => {
                write!(f, "Failed to write output '{}': {}", path, error)
            }
            CliError::NotCached(key) => write!(f, "Tile {} is not cached", key),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Cache(e) => Some(e),
            CliError::ReadInput { error, .. } => Some(error),
            CliError::WriteOutput { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<TileCacheError> for CliError {
    fn from(e: TileCacheError) -> Self {
        CliError::Cache(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}
