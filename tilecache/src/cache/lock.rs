//! Store-wide locking.
//!
//! Every store operation runs while holding a guard from [`StoreLock`]. In
//! the default [`LockMode::Global`] mode there is a single mutex, so `put`,
//! `get` and `delete` on any keys are mutually exclusive and the store's
//! filesystem view is always consistent with some serial order of calls.
//!
//! [`LockMode::Sharded`] trades that for throughput: a key always hashes to
//! the same shard, so operations on one tile stay linearizable while
//! operations on different tiles may overlap.
//!
//! Neither mode protects against other processes touching the cache tree.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use parking_lot::{Mutex, MutexGuard};

use crate::coord::TileKey;

/// Default number of shards when sharded locking is requested without a count.
pub const DEFAULT_LOCK_SHARDS: usize = 64;

/// How the store serializes concurrent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// One lock for the whole store.
    #[default]
    Global,
    /// One lock per shard, keys mapped to shards by hash.
    Sharded { shards: usize },
}

impl LockMode {
    /// Number of mutexes this mode uses.
    pub fn shard_count(&self) -> usize {
        match self {
            LockMode::Global => 1,
            LockMode::Sharded { shards } => *shards,
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockMode::Global => write!(f, "global"),
            LockMode::Sharded { shards } => write!(f, "sharded({})", shards),
        }
    }
}

impl FromStr for LockMode {
    type Err = String;

    /// Parses `global` or `sharded`; the shard count is set separately.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(LockMode::Global),
            "sharded" => Ok(LockMode::Sharded {
                shards: DEFAULT_LOCK_SHARDS,
            }),
            other => Err(format!("unknown lock mode '{}'", other)),
        }
    }
}

/// The mutual-exclusion primitive owned by a store.
pub(crate) struct StoreLock {
    shards: Box<[Mutex<()>]>,
}

impl StoreLock {
    /// Build the lock for `mode`. Callers validate that the count is non-zero.
    pub(crate) fn new(mode: LockMode) -> Self {
        let count = mode.shard_count().max(1);
        let shards = (0..count).map(|_| Mutex::new(())).collect();
        Self { shards }
    }

    /// Acquire the lock covering `key`.
    ///
    /// The guard releases on drop, including early returns through `?`.
    pub(crate) fn acquire(&self, key: &TileKey) -> MutexGuard<'_, ()> {
        self.shards[self.shard_index(key)].lock()
    }

    fn shard_index(&self, key: &TileKey) -> usize {
        if self.shards.len() == 1 {
            return 0;
        }
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.shards.len() as u64) as usize
    }

    pub(crate) fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
