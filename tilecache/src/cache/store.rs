//! Disk-backed tile store.
//!
//! Tiles live at `<root>/<level>/<col>/<row>.<format>`, one file per tile.
//! The file's presence is the only index: a tile is cached exactly when a
//! regular file exists at its derived path.
//!
//! # Consistency
//!
//! Each operation holds the store lock (see [`LockMode`](super::LockMode))
//! for its whole duration, so callers within one process always observe
//! results consistent with some serial order of their calls.
//!
//! The existence checks are plain metadata lookups. Another process, or a
//! user deleting files by hand, can still change the tree between a check
//! and the action that follows it. Consistency against such actors is best
//! effort only:
//!
//! - `put` creates tile files with create-new semantics, so a file that
//!   appears after the check is never overwritten. The late writer gets
//!   [`TileCacheError::AlreadyExists`].
//! - `get` reports [`TileCacheError::Read`] if a file found by the check is
//!   gone or unreadable by the time it is read.
//! - `delete` treats a file that vanished after the check as already deleted.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use super::lock::StoreLock;
use super::path::TilePathLayout;
use super::stats::{StatsSnapshot, StoreStats};
use super::traits::{TileCache, TileCacheError};
use crate::config::StoreConfig;
use crate::coord::TileKey;

/// File-per-tile cache under a root directory.
pub struct TileFileStore {
    layout: TilePathLayout,
    lock: StoreLock,
    sync_writes: bool,
    stats: StoreStats,
}

impl TileFileStore {
    /// Open a store, creating its root directory if it does not exist.
    ///
    /// An existing root directory is reused as is.
    ///
    /// # Errors
    ///
    /// Returns `TileCacheError::InvalidConfig` if the configuration is
    /// invalid or the root exists but is not a directory, and
    /// `TileCacheError::CreateRoot` if the root cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self, TileCacheError> {
        config.validate()?;

        let root = config.root_directory();
        if !root.is_dir() {
            if root.exists() {
                return Err(TileCacheError::InvalidConfig(format!(
                    "cache root {} is not a directory",
                    root.display()
                )));
            }
            fs::create_dir_all(root).map_err(|source| TileCacheError::CreateRoot {
                path: root.to_path_buf(),
                source,
            })?;
            info!(root = %root.display(), "Created tile cache directory");
        }

        debug!(
            root = %root.display(),
            format = %config.format,
            lock_mode = %config.lock_mode,
            sync_writes = config.sync_writes,
            "Opened tile file store"
        );

        Ok(Self {
            layout: TilePathLayout::new(config.root_directory.clone(), config.format.clone()),
            lock: StoreLock::new(config.lock_mode),
            sync_writes: config.sync_writes,
            stats: StoreStats::new(),
        })
    }

    /// Open a store with the default global lock.
    pub fn new(root: impl AsRef<Path>, format: &str) -> Result<Self, TileCacheError> {
        Self::open(StoreConfig::new(root.as_ref(), format))
    }

    /// Root directory of the cache tree.
    pub fn root_directory(&self) -> &Path {
        self.layout.root()
    }

    /// Tile file extension.
    pub fn format(&self) -> &str {
        self.layout.format()
    }

    /// Path layout used by this store.
    pub fn layout(&self) -> &TilePathLayout {
        &self.layout
    }

    /// File a tile is (or would be) stored in.
    pub fn tile_path(&self, key: &TileKey) -> PathBuf {
        self.layout.tile_path(key)
    }

    /// Directory a tile is (or would be) stored in.
    pub fn tile_directory(&self, key: &TileKey) -> PathBuf {
        self.layout.tile_directory(key)
    }

    /// Operation counters since the store was opened.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn exists(path: &Path) -> bool {
        path.is_file()
    }

    /// Create `path` (which must not exist) and fill it with `payload`.
    fn write_new_file(&self, path: &Path, payload: &[u8]) -> Result<(), TileCacheError> {
        let sync = self.sync_writes;
        Self::create_and_fill(path, |file| {
            write_payload(file, payload)?;
            if sync {
                file.sync_all()?;
            }
            Ok(())
        })
    }

    /// Create `path` with create-new semantics and hand the open file to `fill`.
    ///
    /// If `fill` fails, the partial file is removed so it cannot later be
    /// read back as a complete tile. The file is closed before returning.
    fn create_and_fill<F>(path: &Path, fill: F) -> Result<(), TileCacheError>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(TileCacheError::AlreadyExists {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(TileCacheError::Write {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let result = fill(&mut file);
        drop(file);

        if let Err(source) = result {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "Failed to remove partial tile file");
            }
            return Err(TileCacheError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
        Ok(())
    }
}

fn write_payload<W: Write>(writer: &mut W, payload: &[u8]) -> io::Result<()> {
    writer.write_all(payload)?;
    writer.flush()
}

impl TileCache for TileFileStore {
    fn put(&self, key: &TileKey, payload: &[u8]) -> Result<(), TileCacheError> {
        let path = self.layout.tile_path(key);
        let _guard = self.lock.acquire(key);

        if Self::exists(&path) {
            self.stats.record_duplicate_put();
            debug!(tile = %key, "Tile already cached, ignoring put");
            return Ok(());
        }

        let dir = self.layout.tile_directory(key);
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| TileCacheError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
        }

        self.write_new_file(&path, payload)?;
        self.stats.record_write(payload.len());
        trace!(tile = %key, bytes = payload.len(), "Tile stored");
        Ok(())
    }

    fn get(&self, key: &TileKey) -> Result<Option<Vec<u8>>, TileCacheError> {
        let path = self.layout.tile_path(key);
        let _guard = self.lock.acquire(key);

        if !Self::exists(&path) {
            self.stats.record_miss();
            trace!(tile = %key, "Tile cache miss");
            return Ok(None);
        }

        let data = fs::read(&path).map_err(|source| TileCacheError::Read {
            path: path.clone(),
            source,
        })?;
        self.stats.record_hit(data.len());
        trace!(tile = %key, bytes = data.len(), "Tile cache hit");
        Ok(Some(data))
    }

    fn delete(&self, key: &TileKey) -> Result<bool, TileCacheError> {
        let path = self.layout.tile_path(key);
        let _guard = self.lock.acquire(key);

        if !Self::exists(&path) {
            return Ok(false);
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                self.stats.record_delete();
                trace!(tile = %key, "Tile deleted");
                Ok(true)
            }
            // Removed by someone else since the check
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(TileCacheError::Delete { path, source }),
        }
    }
}

impl fmt::Debug for TileFileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileFileStore")
            .field("root", &self.layout.root())
            .field("format", &self.layout.format())
            .field("lock_shards", &self.lock.shard_count())
            .field("sync_writes", &self.sync_writes)
            .finish()
    }
}
