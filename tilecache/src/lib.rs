//! tilecache - Disk-backed map tile cache
//!
//! Persists tile payloads (encoded images, vector tiles, any opaque bytes)
//! under a directory tree keyed by zoom level, column and row, so a tile
//! fetched or rendered once can be served from disk afterwards.
//!
//! # High-Level API
//!
//! ```ignore
//! use tilecache::cache::{TileCache, TileFileStore};
//! use tilecache::config::StoreConfig;
//! use tilecache::coord::TileKey;
//!
//! let store = TileFileStore::open(StoreConfig::new("/var/cache/tiles", "png"))?;
//! let key = TileKey::new(12, 2048, 1365);
//!
//! if store.get(&key)?.is_none() {
//!     let bytes = fetch_tile(&key)?;
//!     store.put(&key, &bytes)?;
//! }
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod logging;

/// Version of the tilecache library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
