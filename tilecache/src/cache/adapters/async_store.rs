//! Async bridge over a blocking tile cache.
//!
//! Store operations are blocking filesystem calls. Running them directly on
//! a Tokio worker stalls every task scheduled on that worker, so this
//! adapter moves each call onto the blocking pool. The underlying store's
//! locking and ordering guarantees are unchanged.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::cache::traits::{TileCache, TileCacheError};
use crate::coord::TileKey;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Async counterpart of [`TileCache`].
///
/// Uses `Pin<Box<dyn Future>>` so implementations can be held as
/// `Arc<dyn AsyncTileCache>`.
pub trait AsyncTileCache: Send + Sync {
    /// Store a payload; a no-op if the tile is already cached.
    fn put(&self, key: TileKey, payload: Vec<u8>) -> BoxFuture<'_, Result<(), TileCacheError>>;

    /// Retrieve a copy of a cached payload, `Ok(None)` on a miss.
    fn get(&self, key: TileKey) -> BoxFuture<'_, Result<Option<Vec<u8>>, TileCacheError>>;

    /// Remove a cached tile, `Ok(false)` if there was none.
    fn delete(&self, key: TileKey) -> BoxFuture<'_, Result<bool, TileCacheError>>;
}

/// Runs a blocking [`TileCache`] on Tokio's blocking thread pool.
///
/// Must be used from within a Tokio runtime.
#[derive(Clone)]
pub struct AsyncTileStore {
    inner: Arc<dyn TileCache>,
}

impl AsyncTileStore {
    /// Wrap a blocking cache.
    pub fn new(inner: Arc<dyn TileCache>) -> Self {
        Self { inner }
    }

    /// The wrapped blocking cache.
    pub fn inner(&self) -> &Arc<dyn TileCache> {
        &self.inner
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, TileCacheError>
where
    F: FnOnce() -> Result<T, TileCacheError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TileCacheError::Task(e.to_string()))?
}

impl AsyncTileCache for AsyncTileStore {
    fn put(&self, key: TileKey, payload: Vec<u8>) -> BoxFuture<'_, Result<(), TileCacheError>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(run_blocking(move || inner.put(&key, &payload)))
    }

    fn get(&self, key: TileKey) -> BoxFuture<'_, Result<Option<Vec<u8>>, TileCacheError>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(run_blocking(move || inner.get(&key)))
    }

    fn delete(&self, key: TileKey) -> BoxFuture<'_, Result<bool, TileCacheError>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(run_blocking(move || inner.delete(&key)))
    }
}
