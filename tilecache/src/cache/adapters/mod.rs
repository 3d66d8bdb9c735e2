//! Adapters exposing tile stores to other execution models.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  async fetch/render pipeline │
//! └──────────────┬───────────────┘
//!                │ AsyncTileCache
//!                ▼
//! ┌──────────────────────────────┐
//! │        AsyncTileStore        │  spawn_blocking per call
//! └──────────────┬───────────────┘
//!                │ TileCache
//!                ▼
//! ┌──────────────────────────────┐
//! │        TileFileStore         │  blocking filesystem I/O
//! └──────────────────────────────┘
//! ```

mod async_store;

pub use async_store::{AsyncTileCache, AsyncTileStore, BoxFuture};
