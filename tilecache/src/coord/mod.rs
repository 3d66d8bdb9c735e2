//! Tile key types.
//!
//! A tile is addressed by its zoom level and its column/row position in the
//! tile grid at that level. The key is the only input to on-disk path
//! derivation, so its textual form is kept locale-invariant and stable.

mod types;

pub use types::{KeyParseError, TileKey};
