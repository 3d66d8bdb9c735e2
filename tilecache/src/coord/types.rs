//! Tile key type definitions

use std::fmt;
use std::str::FromStr;

/// Index of a single cached tile.
///
/// Two keys are equal exactly when all three components are equal, and
/// distinct keys always map to distinct cache files. Components are signed
/// so that trees holding negative grid positions (`3/-1/5.png`) stay
/// addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Zoom level
    pub level: i32,
    /// X coordinate (east-west) in the tile grid
    pub col: i32,
    /// Y coordinate (north-south) in the tile grid
    pub row: i32,
}

impl TileKey {
    /// Create a key from its three components.
    #[inline]
    pub const fn new(level: i32, col: i32, row: i32) -> Self {
        Self { level, col, row }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.level, self.col, self.row)
    }
}

impl From<(i32, i32, i32)> for TileKey {
    fn from((level, col, row): (i32, i32, i32)) -> Self {
        Self { level, col, row }
    }
}

/// Errors returned when parsing a [`TileKey`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    /// Input did not have exactly three components
    WrongComponentCount(String),
    /// A component was not a decimal integer
    InvalidComponent { name: &'static str, value: String },
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::WrongComponentCount(input) => {
                write!(
                    f,
                    "Invalid tile key: '{}' (expected level/col/row)",
                    input
                )
            }
            KeyParseError::InvalidComponent { name, value } => {
                write!(
                    f,
                    "Invalid tile key {}: '{}' (must be an integer)",
                    name, value
                )
            }
        }
    }
}

impl std::error::Error for KeyParseError {}

impl FromStr for TileKey {
    type Err = KeyParseError;

    /// Parse `level/col/row`. `,` and `:` are accepted as separators too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(['/', ',', ':']).collect();
        if parts.len() != 3 {
            return Err(KeyParseError::WrongComponentCount(s.to_string()));
        }

        let parse = |name: &'static str, value: &str| {
            value
                .trim()
                .parse::<i32>()
                .map_err(|_| KeyParseError::InvalidComponent {
                    name,
                    value: value.to_string(),
                })
        };

        Ok(TileKey {
            level: parse("level", parts[0])?,
            col: parse("col", parts[1])?,
            row: parse("row", parts[2])?,
        })
    }
}
