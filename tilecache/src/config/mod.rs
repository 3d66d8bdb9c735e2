//! Configuration for tile stores.
//!
//! [`StoreConfig`] is what a [`TileFileStore`](crate::cache::TileFileStore)
//! is constructed from. [`ConfigFile`] loads user settings from
//! `~/.tilecache/config.ini` and turns them into a `StoreConfig`.

mod file;
mod store;

pub use file::{
    config_directory, config_file_path, default_cache_directory, CacheSettings, ConfigFile,
    ConfigFileError, LoggingSettings,
};
pub use store::{StoreConfig, DEFAULT_FORMAT};
