//! Core trait and error type for tile caches.
//!
//! The `TileCache` trait is the whole public surface a tile fetch or render
//! pipeline needs: store a payload, look one up, drop one. A miss is
//! `Ok(None)`; errors are reserved for storage failures, which are passed
//! through to the caller untouched so it can decide whether to treat the
//! tile as uncached or to abort.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tilecache::cache::{TileCache, TileFileStore};
//! use tilecache::config::StoreConfig;
//! use tilecache::coord::TileKey;
//!
//! let store: Arc<dyn TileCache> = Arc::new(TileFileStore::open(StoreConfig::new("/cache", "png"))?);
//! let key = TileKey::new(3, 5, 7);
//!
//! store.put(&key, &png_bytes)?;
//! if let Some(data) = store.get(&key)? {
//!     // Cache hit
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::coord::TileKey;

/// Errors that can occur during tile cache operations.
#[derive(Debug, Error)]
pub enum TileCacheError {
    /// The cache root could not be created.
    #[error("Failed to create cache root {}: {source}", .path.display())]
    CreateRoot { path: PathBuf, source: io::Error },

    /// The directory for a tile could not be created.
    #[error("Failed to create tile directory {}: {source}", .path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    /// Writing a tile file failed.
    #[error("Failed to write tile {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Reading a tile file failed after it was found.
    #[error("Failed to read tile {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Removing a tile file failed.
    #[error("Failed to delete tile {}: {source}", .path.display())]
    Delete { path: PathBuf, source: io::Error },

    /// Another writer created the tile file after the existence check.
    #[error("Tile file already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    /// The store was configured with invalid values.
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// A blocking cache call could not be joined.
    #[error("Cache task failed: {0}")]
    Task(String),
}

impl TileCacheError {
    /// The underlying I/O error, for variants that wrap one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            TileCacheError::CreateRoot { source, .. }
            | TileCacheError::CreateDirectory { source, .. }
            | TileCacheError::Write { source, .. }
            | TileCacheError::Read { source, .. }
            | TileCacheError::Delete { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Key-value interface for tile payload storage.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every thread of the hosting application.
pub trait TileCache: Send + Sync {
    /// Store a payload under `key`.
    ///
    /// If the tile is already cached this is a silent no-op: the existing
    /// content is authoritative and is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `TileCacheError` if the directory or file cannot be created or
    /// written, or if a racing writer created the file first.
    fn put(&self, key: &TileKey, payload: &[u8]) -> Result<(), TileCacheError>;

    /// Retrieve a copy of the payload stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))` if the tile is cached
    /// - `Ok(None)` if it is not
    /// - `Err(_)` if the tile was found but could not be read
    fn get(&self, key: &TileKey) -> Result<Option<Vec<u8>>, TileCacheError>;

    /// Remove the tile stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a tile was removed
    /// - `Ok(false)` if there was nothing to remove
    /// - `Err(_)` if removal was blocked
    fn delete(&self, key: &TileKey) -> Result<bool, TileCacheError>;
}
