//! Store construction settings.

use std::path::{Path, PathBuf};

use crate::cache::{LockMode, TileCacheError};

/// File extension used when none is configured.
pub const DEFAULT_FORMAT: &str = "png";

/// Settings fixed for the lifetime of a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory of the cache tree. Created on open if absent.
    pub root_directory: PathBuf,

    /// Tile file extension without the leading dot (e.g. `png`).
    pub format: String,

    /// How concurrent operations are serialized.
    pub lock_mode: LockMode,

    /// `fsync` each tile file before closing it.
    pub sync_writes: bool,
}

impl StoreConfig {
    /// Create a config with the default global lock and no fsync.
    pub fn new(root_directory: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            root_directory: root_directory.into(),
            format: format.into(),
            lock_mode: LockMode::Global,
            sync_writes: false,
        }
    }

    /// Set the lock mode.
    pub fn with_lock_mode(mut self, lock_mode: LockMode) -> Self {
        self.lock_mode = lock_mode;
        self
    }

    /// Enable or disable fsync on write.
    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    /// Root directory of the cache tree.
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Check values that would otherwise produce paths outside the layout.
    pub fn validate(&self) -> Result<(), TileCacheError> {
        if self.format.is_empty() {
            return Err(TileCacheError::InvalidConfig(
                "format must not be empty".to_string(),
            ));
        }
        if self.format.starts_with('.') {
            return Err(TileCacheError::InvalidConfig(format!(
                "format '{}' must not start with '.'",
                self.format
            )));
        }
        if self.format.contains(['/', '\\']) {
            return Err(TileCacheError::InvalidConfig(format!(
                "format '{}' must not contain a path separator",
                self.format
            )));
        }
        if let LockMode::Sharded { shards: 0 } = self.lock_mode {
            return Err(TileCacheError::InvalidConfig(
                "sharded lock needs at least one shard".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_new() {
        let config = StoreConfig::new("/cache", "png");
        assert_eq!(config.root_directory(), Path::new("/cache"));
        assert_eq!(config.format, "png");
        assert_eq!(config.lock_mode, LockMode::Global);
        assert!(!config.sync_writes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_config_builder() {
        let config = StoreConfig::new("/cache", "jpg")
            .with_lock_mode(LockMode::Sharded { shards: 8 })
            .with_sync_writes(true);

        assert_eq!(config.lock_mode, LockMode::Sharded { shards: 8 });
        assert!(config.sync_writes);
    }

    #[test]
    fn test_validate_rejects_bad_formats() {
        for format in ["", ".png", "a/b", r"a\b"] {
            let err = StoreConfig::new("/cache", format).validate().unwrap_err();
            assert!(
                matches!(err, TileCacheError::InvalidConfig(_)),
                "format {:?} should be rejected",
                format
            );
        }
    }

    #[test]
    fn test_validate_accepts_compound_extension() {
        assert!(StoreConfig::new("/cache", "pbf.gz").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_shards() {
        let config =
            StoreConfig::new("/cache", "png").with_lock_mode(LockMode::Sharded { shards: 0 });
        assert!(config.validate().is_err());
    }
}
