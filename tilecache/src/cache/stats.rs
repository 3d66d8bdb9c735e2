//! Lock-free operation counters for a tile store.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters updated by every store operation.
#[derive(Debug, Default)]
pub struct StoreStats {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    duplicate_puts: AtomicU64,
    deletes: AtomicU64,
    bytes_written: AtomicU64,
    bytes_read: AtomicU64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self, bytes: usize) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self, bytes: usize) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_duplicate_put(&self) {
        self.duplicate_puts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            duplicate_puts: self.duplicate_puts.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`StoreStats`] for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// `get` calls that found a tile
    pub hits: u64,
    /// `get` calls that found nothing
    pub misses: u64,
    /// Tiles written by `put`
    pub writes: u64,
    /// `put` calls skipped because the tile already existed
    pub duplicate_puts: u64,
    /// Tiles removed by `delete`
    pub deletes: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
}

impl StatsSnapshot {
    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} ({:.1}% hit rate), writes={} ({} bytes), duplicates={}, deletes={}",
            self.hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.writes,
            self.bytes_written,
            self.duplicate_puts,
            self.deletes
        )
    }
}
