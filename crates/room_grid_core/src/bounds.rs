//! Axis-aligned cell rectangles

use crate::CellCoord;
use serde::{Deserialize, Serialize};

/// Rectangle `[x_start, x_start + width_cells) x [y_start, y_start + height_cells)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    pub x_start: i32,
    pub y_start: i32,
    pub width_cells: i32,
    pub height_cells: i32,
}

impl GridBounds {
    pub fn new(x_start: i32, y_start: i32, width_cells: i32, height_cells: i32) -> Self {
        Self {
            x_start,
            y_start,
            width_cells,
            height_cells,
        }
    }

    /// Minimal rectangle covering every coordinate, `None` for an empty input
    pub fn from_coords<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

        for coord in iter {
            min_x = min_x.min(coord.x);
            min_y = min_y.min(coord.y);
            max_x = max_x.max(coord.x);
            max_y = max_y.max(coord.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Exclusive right edge
    pub fn x_end(&self) -> i32 {
        self.x_start + self.width_cells
    }

    /// Exclusive bottom edge
    pub fn y_end(&self) -> i32 {
        self.y_start + self.height_cells
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x >= self.x_start
            && coord.x < self.x_end()
            && coord.y >= self.y_start
            && coord.y < self.y_end()
    }

    /// Cells in row-major order (y ascending outer, x ascending inner)
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let (x_start, x_end) = (self.x_start, self.x_end());
        (self.y_start..self.y_end())
            .flat_map(move |y| (x_start..x_end).map(move |x| CellCoord::new(x, y)))
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x_start + dx,
            self.y_start + dy,
            self.width_cells,
            self.height_cells,
        )
    }

    /// Grow by `margin` cells on every side
    pub fn padded(&self, margin: i32) -> Self {
        Self::new(
            self.x_start - margin,
            self.y_start - margin,
            self.width_cells + margin * 2,
            self.height_cells + margin * 2,
        )
    }
}
