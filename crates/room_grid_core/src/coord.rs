//! Grid coordinates and their canonical string keys

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest side length the editor will create (grids are clamped to 40x40)
pub const MAX_GRID_SIDE: i32 = 40;
/// Largest coordinate a stored cell or placement origin may use
pub const MAX_COORD: i32 = 49;
/// Largest width/height in cells a stored placement or room may span
pub const MAX_SPAN_CELLS: i32 = 50;
/// Edge length of one cell in meters (display only)
pub const CELL_SIZE_M: f32 = 0.5;

/// A grid address. Two coordinates are the same cell iff `x` and `y` match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical `"{x}:{y}"` key
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// The four orthogonal neighbours: left, right, up, down
    pub fn neighbors(&self) -> [CellCoord; 4] {
        [
            CellCoord::new(self.x - 1, self.y),
            CellCoord::new(self.x + 1, self.y),
            CellCoord::new(self.x, self.y - 1),
            CellCoord::new(self.x, self.y + 1),
        ]
    }

    /// Shift by a signed offset
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// Failure to parse a `"x:y"` key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordError {
    MissingSeparator(String),
    InvalidNumber(String),
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::MissingSeparator(key) => {
                write!(f, "Cell key '{}' has no ':' separator", key)
            }
            ParseCoordError::InvalidNumber(key) => {
                write!(f, "Cell key '{}' has a non-integer part", key)
            }
        }
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for CellCoord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(':')
            .ok_or_else(|| ParseCoordError::MissingSeparator(s.to_string()))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| ParseCoordError::InvalidNumber(s.to_string()))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| ParseCoordError::InvalidNumber(s.to_string()))?;
        Ok(Self::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let coord = CellCoord::new(12, 7);
        assert_eq!(coord.key(), "12:7");
        assert_eq!("12:7".parse::<CellCoord>(), Ok(coord));
        assert_eq!("-1:3".parse::<CellCoord>(), Ok(CellCoord::new(-1, 3)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "12".parse::<CellCoord>(),
            Err(ParseCoordError::MissingSeparator("12".to_string()))
        );
        assert_eq!(
            "a:1".parse::<CellCoord>(),
            Err(ParseCoordError::InvalidNumber("a:1".to_string()))
        );
    }

    #[test]
    fn test_neighbors_order() {
        let n = CellCoord::new(1, 1).neighbors();
        assert_eq!(
            n,
            [
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&CellCoord::new(3, 4)).unwrap();
        assert_eq!(json, r#"{"x":3,"y":4}"#);
    }
}
