//! The editable room grid and its painting rules
//!
//! A [`RoomGrid`] is a `width x height` board of cells. Filling follows the
//! connected-region rule: the first cell of an empty grid may go anywhere,
//! every later cell needs an already-filled orthogonal neighbour. An optional
//! allowed mask further restricts which cells may ever be filled.
//!
//! Every mutating method works in place and returns `&mut Self` so calls can
//! be chained. Rejected operations (disallowed cell, no filled neighbour,
//! coordinate outside the board) are silent no-ops.
//!
//! Filled cells are kept in the order they were painted. Every cell in that
//! order passed the neighbour check when it was added, so feeding it back
//! through [`RoomGrid::apply_cells`] reproduces the same region.

use crate::{CellCoord, GridBounds, CELL_SIZE_M, MAX_GRID_SIDE};
use indexmap::IndexSet;

/// Per-cell view derived from a [`RoomGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub filled: bool,
    pub allowed: bool,
}

impl GridCell {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }
}

/// Editable board. The filled set is the only record of which cells are
/// filled; per-cell views are computed from it on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGrid {
    width: i32,
    height: i32,
    cell_size_m: f32,
    /// Cell indices (y * width + x) in paint order
    filled: IndexSet<usize>,
    /// Row-major allowed mask; `None` means every cell is allowed
    allowed: Option<Vec<bool>>,
}

impl RoomGrid {
    /// Create a grid. Each side is clamped to `1..=40`.
    pub fn new(width: i32, height: i32, fill_all: bool) -> Self {
        let width = width.clamp(1, MAX_GRID_SIDE);
        let height = height.clamp(1, MAX_GRID_SIDE);
        let filled = if fill_all {
            (0..(width * height) as usize).collect()
        } else {
            IndexSet::new()
        };
        Self {
            width,
            height,
            cell_size_m: CELL_SIZE_M,
            filled,
            allowed: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size_m(&self) -> f32 {
        self.cell_size_m
    }

    fn len(&self) -> usize {
        (self.width * self.height) as usize
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        Some((coord.y * self.width + coord.x) as usize)
    }

    fn coord_at(&self, index: usize) -> CellCoord {
        let index = index as i32;
        CellCoord::new(index % self.width, index / self.width)
    }

    /// Whether the coordinate lies on the board
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.index(coord).is_some()
    }

    pub fn is_filled(&self, coord: CellCoord) -> bool {
        self.index(coord).is_some_and(|idx| self.filled.contains(&idx))
    }

    /// Whether the cell may be filled as far as the allowed mask goes.
    /// Off-board coordinates are never allowed.
    pub fn is_allowed(&self, coord: CellCoord) -> bool {
        match (self.index(coord), &self.allowed) {
            (Some(idx), Some(mask)) => mask[idx],
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn has_allowed_mask(&self) -> bool {
        self.allowed.is_some()
    }

    /// Number of filled cells
    pub fn filled_len(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    /// Derived view of one cell, `None` when off the board
    pub fn cell(&self, coord: CellCoord) -> Option<GridCell> {
        self.index(coord).map(|idx| self.cell_at(idx))
    }

    fn cell_at(&self, idx: usize) -> GridCell {
        let coord = self.coord_at(idx);
        GridCell {
            x: coord.x,
            y: coord.y,
            filled: self.filled.contains(&idx),
            allowed: self.allowed.as_ref().map_or(true, |mask| mask[idx]),
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.len()).map(move |idx| self.cell_at(idx))
    }

    fn filled_iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.filled.iter().map(move |idx| self.coord_at(*idx))
    }

    /// Filled coordinates in paint order. Sort the result when a fixed order
    /// is needed.
    pub fn filled_cells(&self) -> Vec<CellCoord> {
        self.filled_iter().collect()
    }

    /// Canonical `"x:y"` keys of the filled cells, in paint order
    pub fn filled_keys(&self) -> Vec<String> {
        self.filled_iter().map(|coord| coord.key()).collect()
    }

    /// Minimal rectangle covering the filled cells, `None` when nothing is filled
    pub fn bounds(&self) -> Option<GridBounds> {
        GridBounds::from_coords(self.filled_iter())
    }

    fn has_filled_neighbor(&self, coord: CellCoord) -> bool {
        coord
            .neighbors()
            .iter()
            .any(|neighbor| self.is_filled(*neighbor))
    }

    /// The rule `set_cell(.., true)` enforces: the cell is allowed and either
    /// the grid is empty or an orthogonal neighbour is already filled.
    pub fn can_fill_cell(&self, coord: CellCoord) -> bool {
        if !self.is_allowed(coord) {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        self.has_filled_neighbor(coord)
    }

    /// Fill or clear one cell. Filling is subject to [`Self::can_fill_cell`];
    /// clearing is unconditional and may split the region into islands.
    pub fn set_cell(&mut self, coord: CellCoord, filled: bool) -> &mut Self {
        let Some(idx) = self.index(coord) else {
            return self;
        };

        if filled {
            if !self.can_fill_cell(coord) {
                tracing::trace!("rejected fill at {}", coord);
                return self;
            }
            // Refilling a filled cell keeps its original position
            self.filled.insert(idx);
        } else {
            self.filled.shift_remove(&idx);
        }
        self
    }

    /// Fill an empty cell (same checks as `set_cell`) or clear a filled one
    pub fn toggle_cell(&mut self, coord: CellCoord) -> &mut Self {
        let filled = self.is_filled(coord);
        self.set_cell(coord, !filled)
    }

    /// Empty the whole grid
    pub fn clear(&mut self) -> &mut Self {
        self.filled.clear();
        self
    }

    /// Fill every on-board cell of the rectangle one at a time in row-major
    /// order, so each cell is judged against the fill as it stands then.
    pub fn fill_rectangle(&mut self, bounds: GridBounds) -> &mut Self {
        for coord in bounds.coords() {
            if self.contains(coord) {
                self.set_cell(coord, true);
            }
        }
        self
    }

    /// Clear the grid, then fill the given cells in the order supplied.
    ///
    /// Cells without a filled neighbour at the moment they are reached are
    /// dropped, so callers must pass coordinates in an order that keeps the
    /// region connected, such as the output of [`Self::filled_cells`].
    /// Row-major order is only safe for rectangles.
    pub fn apply_cells<I>(&mut self, coords: I) -> &mut Self
    where
        I: IntoIterator<Item = CellCoord>,
    {
        self.clear();
        for coord in coords {
            self.set_cell(coord, true);
        }
        self
    }

    /// Replace the allowed mask with exactly the given cells. Filled cells
    /// outside the new mask are cleared.
    pub fn apply_allowed_cells<I>(&mut self, coords: I) -> &mut Self
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut mask = vec![false; self.len()];
        for coord in coords {
            if let Some(idx) = self.index(coord) {
                mask[idx] = true;
            }
        }

        self.filled.retain(|idx| mask[*idx]);
        self.allowed = Some(mask);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> CellCoord {
        CellCoord::new(x, y)
    }

    #[test]
    fn test_new_clamps_each_side() {
        let grid = RoomGrid::new(0, 50, true);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 40);
        assert_eq!(grid.filled_len(), 40);
        assert!(grid.cells().all(|cell| cell.filled && cell.allowed));

        let grid = RoomGrid::new(-3, 7, false);
        assert_eq!((grid.width(), grid.height()), (1, 7));
        assert!(grid.is_empty());
        assert_eq!(grid.cell_size_m(), 0.5);
    }

    #[test]
    fn test_adjacency_rejects_isolated_cell() {
        let mut grid = RoomGrid::new(3, 3, false);
        grid.set_cell(c(1, 1), true);
        assert_eq!(grid.filled_len(), 1);

        grid.set_cell(c(0, 0), true);
        assert_eq!(grid.filled_len(), 1);
        assert!(!grid.is_filled(c(0, 0)));
        assert!(!grid.can_fill_cell(c(0, 0)));
        assert!(grid.can_fill_cell(c(0, 1)));
    }

    #[test]
    fn test_toggle_respects_adjacency() {
        let mut grid = RoomGrid::new(3, 3, false);
        grid.set_cell(c(1, 1), true);

        grid.toggle_cell(c(0, 0));
        assert_eq!(grid.filled_len(), 1);
        assert!(!grid.is_filled(c(0, 0)));

        grid.toggle_cell(c(1, 0));
        assert!(grid.is_filled(c(1, 0)));
        grid.toggle_cell(c(1, 0));
        assert!(!grid.is_filled(c(1, 0)));
    }

    #[test]
    fn test_clearing_bridge_leaves_islands() {
        let mut grid = RoomGrid::new(3, 1, false);
        grid.set_cell(c(0, 0), true)
            .set_cell(c(1, 0), true)
            .set_cell(c(2, 0), true)
            .set_cell(c(1, 0), false);

        assert_eq!(grid.filled_cells(), vec![c(0, 0), c(2, 0)]);
    }

    #[test]
    fn test_off_board_is_ignored() {
        let mut grid = RoomGrid::new(2, 2, false);
        grid.set_cell(c(5, 5), true).set_cell(c(-1, 0), true);
        assert!(grid.is_empty());
        assert!(grid.cell(c(2, 0)).is_none());
        assert!(!grid.can_fill_cell(c(-1, 0)));
    }

    #[test]
    fn test_bounds() {
        let mut grid = RoomGrid::new(4, 4, false);
        assert_eq!(grid.bounds(), None);

        grid.set_cell(c(1, 2), true).set_cell(c(2, 2), true);
        assert_eq!(grid.bounds(), Some(GridBounds::new(1, 2, 2, 1)));
    }

    #[test]
    fn test_allowed_mask_clears_outside_cells() {
        let mut grid = RoomGrid::new(2, 2, false);
        grid.set_cell(c(0, 0), true)
            .set_cell(c(1, 0), true)
            .set_cell(c(1, 1), true);
        grid.set_cell(c(1, 0), false);
        assert_eq!(grid.filled_len(), 2);

        grid.apply_allowed_cells([c(0, 0)]);

        assert_eq!(grid.filled_len(), 1);
        let kept = grid.cell(c(0, 0)).unwrap();
        assert!(kept.filled && kept.allowed);
        let dropped = grid.cell(c(1, 1)).unwrap();
        assert!(!dropped.filled && !dropped.allowed);
    }

    #[test]
    fn test_allowed_mask_blocks_first_fill() {
        let mut grid = RoomGrid::new(3, 3, false);
        grid.apply_allowed_cells([c(1, 1), c(2, 1)]);

        grid.set_cell(c(0, 0), true);
        assert!(grid.is_empty());

        grid.set_cell(c(2, 1), true).set_cell(c(1, 1), true);
        grid.set_cell(c(1, 2), true);
        assert_eq!(grid.filled_cells(), vec![c(2, 1), c(1, 1)]);
        assert!(grid.has_allowed_mask());
    }

    #[test]
    fn test_apply_cells_clears_previous_fill() {
        let mut grid = RoomGrid::new(4, 4, true);
        grid.apply_cells([c(3, 3), c(3, 2)]);

        assert_eq!(grid.filled_keys(), vec!["3:3".to_string(), "3:2".to_string()]);
    }

    #[test]
    fn test_apply_cells_drops_out_of_order_cells() {
        let mut grid = RoomGrid::new(4, 1, false);
        grid.apply_cells([c(0, 0), c(2, 0), c(1, 0)]);

        // (2,0) had no filled neighbour when it was reached
        assert_eq!(grid.filled_cells(), vec![c(0, 0), c(1, 0)]);
    }

    #[test]
    fn test_apply_cells_round_trip_in_connected_order() {
        let coords: Vec<_> = GridBounds::new(2, 1, 3, 2).coords().collect();
        let mut grid = RoomGrid::new(6, 6, false);
        grid.apply_cells(coords.iter().copied());

        let mut filled = grid.filled_cells();
        filled.sort();
        let mut expected = coords;
        expected.sort();
        assert_eq!(filled, expected);
    }

    #[test]
    fn test_fill_rectangle_skips_off_board() {
        let mut grid = RoomGrid::new(3, 3, false);
        grid.fill_rectangle(GridBounds::new(1, 1, 4, 4));

        assert_eq!(grid.filled_len(), 4);
        assert_eq!(grid.bounds(), Some(GridBounds::new(1, 1, 2, 2)));
    }

    #[test]
    fn test_fill_rectangle_joins_existing_region_only_when_adjacent() {
        let mut grid = RoomGrid::new(6, 1, false);
        grid.set_cell(c(0, 0), true);
        grid.fill_rectangle(GridBounds::new(3, 0, 2, 1));

        assert_eq!(grid.filled_cells(), vec![c(0, 0)]);
    }

    #[test]
    fn test_filled_cells_follow_paint_order() {
        let mut grid = RoomGrid::new(3, 3, false);
        grid.set_cell(c(1, 0), true)
            .set_cell(c(1, 1), true)
            .set_cell(c(0, 1), true)
            .set_cell(c(1, 0), true);

        assert_eq!(grid.filled_cells(), vec![c(1, 0), c(1, 1), c(0, 1)]);
        assert_eq!(grid.filled_keys(), vec!["1:0", "1:1", "0:1"]);

        grid.set_cell(c(1, 1), false).set_cell(c(1, 1), true);
        assert_eq!(grid.filled_cells(), vec![c(1, 0), c(0, 1), c(1, 1)]);
    }

    #[test]
    fn test_paint_order_reloads_shape_row_major_would_drop() {
        // U shape painted down the left arm, across the base, up the right arm
        let painted = [c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2), c(2, 1), c(2, 0)];
        let mut grid = RoomGrid::new(5, 5, false);
        for cell in painted {
            grid.set_cell(cell, true);
        }
        assert_eq!(grid.filled_len(), painted.len());

        let mut reloaded = RoomGrid::new(5, 5, false);
        reloaded.apply_cells(grid.filled_cells());
        assert_eq!(reloaded.filled_cells(), painted.to_vec());

        // The same cells in row-major order lose the right arm's top
        let mut row_major = grid.filled_cells();
        row_major.sort_by_key(|cell| (cell.y, cell.x));
        let mut lossy = RoomGrid::new(5, 5, false);
        lossy.apply_cells(row_major);
        assert!(lossy.filled_len() < painted.len());
    }

    #[test]
    fn test_allowed_mask_keeps_paint_order_of_survivors() {
        let mut grid = RoomGrid::new(3, 1, false);
        grid.set_cell(c(2, 0), true)
            .set_cell(c(1, 0), true)
            .set_cell(c(0, 0), true);
        grid.apply_allowed_cells([c(0, 0), c(2, 0)]);

        assert_eq!(grid.filled_cells(), vec![c(2, 0), c(0, 0)]);
    }
}
