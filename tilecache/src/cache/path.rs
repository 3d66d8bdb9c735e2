//! Cache path construction.

use crate::coord::TileKey;
use std::path::{Path, PathBuf};

/// Maps tile keys to locations under a cache root.
///
/// Creates a hierarchical path structure:
/// ```text
/// <root>/<level>/<col>/<row>.<format>
/// ```
///
/// Components are joined with the platform separator and every number is
/// rendered as a plain decimal, so the layout is readable by any existing
/// cache that uses the same scheme.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tilecache::cache::TilePathLayout;
/// use tilecache::coord::TileKey;
///
/// let layout = TilePathLayout::new("/cache", "png");
/// let key = TileKey::new(3, 5, 7);
///
/// assert_eq!(layout.tile_directory(&key), PathBuf::from("/cache/3/5"));
/// assert_eq!(layout.tile_path(&key), PathBuf::from("/cache/3/5/7.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePathLayout {
    root: PathBuf,
    format: String,
}

impl TilePathLayout {
    /// Create a layout rooted at `root` with file extension `format`.
    ///
    /// `format` is used verbatim after a literal `.`.
    pub fn new(root: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            format: format.into(),
        }
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File extension appended to every tile file.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Directory holding all rows of one column: `<root>/<level>/<col>`.
    pub fn tile_directory(&self, key: &TileKey) -> PathBuf {
        self.root
            .join(key.level.to_string())
            .join(key.col.to_string())
    }

    /// File for one tile: `<root>/<level>/<col>/<row>.<format>`.
    pub fn tile_path(&self, key: &TileKey) -> PathBuf {
        self.tile_directory(key)
            .join(format!("{}.{}", key.row, self.format))
    }
}
