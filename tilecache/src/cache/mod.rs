//! Disk-backed tile cache.
//!
//! # Architecture
//!
//! ```text
//! TileKey ──► TilePathLayout ──► <root>/<level>/<col>/<row>.<format>
//!                  │
//!                  ▼
//!           TileFileStore ◄── StoreLock (global or sharded)
//!                  │
//!                  ├── implements TileCache (put / get / delete)
//!                  └── StoreStats (hit/miss/write counters)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tilecache::cache::{TileCache, TileFileStore};
//! use tilecache::coord::TileKey;
//!
//! # fn main() -> Result<(), tilecache::cache::TileCacheError> {
//! let store = TileFileStore::new("/var/cache/tiles", "png")?;
//! let key = TileKey::new(3, 5, 7);
//!
//! store.put(&key, b"...png bytes...")?;
//! assert!(store.get(&key)?.is_some());
//! store.delete(&key)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
mod lock;
mod path;
mod stats;
mod store;
mod traits;

pub use lock::{LockMode, DEFAULT_LOCK_SHARDS};
pub use path::TilePathLayout;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::TileFileStore;
pub use traits::{TileCache, TileCacheError};
