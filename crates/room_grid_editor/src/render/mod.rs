//! Preview geometry - derives the render grid for a sparse set of room cells
//! and keeps furniture overlays co-registered with it.

use crate::facades::PlacementView;
use room_grid_core::{CellCoord, GridBounds};
use uuid::Uuid;

/// Empty cells shown around a room's shape on every side
pub const PREVIEW_PADDING: i32 = 2;

/// Size of the rendered grid and the offset from stored to rendered coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviewLayout {
    pub width: i32,
    pub height: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl PreviewLayout {
    /// Explicit sizes are used as-is (negative sizes become 0, offset 0).
    /// Otherwise the layout is the cells' bounding box plus [`PREVIEW_PADDING`]
    /// on every side, shifted so the box starts at `(PREVIEW_PADDING, PREVIEW_PADDING)`.
    pub fn derive(cells: &[CellCoord], explicit: Option<(i32, i32)>) -> Self {
        if let Some((width, height)) = explicit {
            return Self {
                width: width.max(0),
                height: height.max(0),
                offset_x: 0,
                offset_y: 0,
            };
        }

        match GridBounds::from_coords(cells.iter().copied()) {
            Some(bounds) => Self::padded(bounds),
            None => Self::default(),
        }
    }

    /// Layout around a known bounding box
    pub fn padded(bounds: GridBounds) -> Self {
        let padded = bounds.padded(PREVIEW_PADDING);
        Self {
            width: padded.width_cells,
            height: padded.height_cells,
            offset_x: PREVIEW_PADDING - bounds.x_start,
            offset_y: PREVIEW_PADDING - bounds.y_start,
        }
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Stored -> rendered
    pub fn to_render(&self, coord: CellCoord) -> CellCoord {
        coord.offset(self.offset_x, self.offset_y)
    }

    /// Rendered -> stored
    pub fn from_render(&self, coord: CellCoord) -> CellCoord {
        coord.offset(-self.offset_x, -self.offset_y)
    }

    /// Whether a rendered coordinate is on the preview grid
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Rendered rectangle of a stored rectangle
    pub fn to_render_rect(&self, bounds: GridBounds) -> GridBounds {
        bounds.translate(self.offset_x, self.offset_y)
    }

    /// Rendered rectangle of a furniture placement
    pub fn placement_rect(&self, placement: &PlacementView) -> GridBounds {
        self.to_render_rect(placement.bounds())
    }

    /// Rendered coordinates of the filled mask
    pub fn render_cells(&self, cells: &[CellCoord]) -> Vec<CellCoord> {
        cells.iter().map(|cell| self.to_render(*cell)).collect()
    }

    /// Top-most placement covering a rendered coordinate (later placements draw on top)
    pub fn placement_at(&self, placements: &[PlacementView], coord: CellCoord) -> Option<Uuid> {
        placements
            .iter()
            .rev()
            .find(|placement| self.placement_rect(placement).contains(coord))
            .map(|placement| placement.furniture_id)
    }
}

/// How an overlay should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEmphasis {
    Normal,
    Hovered,
    Highlighted,
}

/// Presentational selection state for placement overlays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewHighlight {
    /// Selected from outside, e.g. a deep link
    pub highlighted: Option<Uuid>,
    /// Under the pointer
    pub hovered: Option<Uuid>,
}

impl PreviewHighlight {
    pub fn set_highlighted(&mut self, id: Option<Uuid>) {
        self.highlighted = id;
    }

    pub fn set_hovered(&mut self, id: Option<Uuid>) {
        self.hovered = id;
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
        self.hovered = None;
    }

    /// Highlight wins over hover
    pub fn emphasis(&self, id: Uuid) -> OverlayEmphasis {
        if self.highlighted == Some(id) {
            OverlayEmphasis::Highlighted
        } else if self.hovered == Some(id) {
            OverlayEmphasis::Hovered
        } else {
            OverlayEmphasis::Normal
        }
    }

    pub fn is_emphasized(&self, id: Uuid) -> bool {
        self.emphasis(id) != OverlayEmphasis::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: i32, y: i32, w: i32, h: i32) -> PlacementView {
        PlacementView {
            furniture_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            x,
            y,
            width_cells: w,
            height_cells: h,
            color: "#ff1744".to_string(),
            name: "Shelf".to_string(),
        }
    }

    #[test]
    fn test_derived_layout_pads_bounding_box() {
        let cells = [CellCoord::new(5, 7), CellCoord::new(8, 7), CellCoord::new(6, 9)];
        let layout = PreviewLayout::derive(&cells, None);

        assert_eq!(layout.width, 4 + 4);
        assert_eq!(layout.height, 3 + 4);
        assert_eq!((layout.offset_x, layout.offset_y), (-3, -5));
        assert_eq!(layout.to_render(CellCoord::new(5, 7)), CellCoord::new(2, 2));
        assert_eq!(layout.from_render(CellCoord::new(2, 2)), CellCoord::new(5, 7));
        assert!(layout
            .render_cells(&cells)
            .iter()
            .all(|cell| layout.contains(*cell)));
    }

    #[test]
    fn test_explicit_size_has_no_offset() {
        let layout = PreviewLayout::derive(&[CellCoord::new(9, 9)], Some((12, -1)));
        assert_eq!(layout, PreviewLayout { width: 12, height: 0, offset_x: 0, offset_y: 0 });
        assert_eq!(layout.cell_count(), 0);
    }

    #[test]
    fn test_empty_cells_give_empty_layout() {
        assert_eq!(PreviewLayout::derive(&[], None), PreviewLayout::default());
    }

    #[test]
    fn test_placements_share_offset() {
        let cells = [CellCoord::new(10, 10), CellCoord::new(13, 12)];
        let layout = PreviewLayout::derive(&cells, None);
        let shelf = placement(11, 10, 2, 3);

        assert_eq!(layout.placement_rect(&shelf), GridBounds::new(3, 2, 2, 3));
        assert_eq!(
            layout.placement_at(&[shelf.clone()], CellCoord::new(4, 4)),
            Some(shelf.furniture_id)
        );
        assert_eq!(layout.placement_at(&[shelf], CellCoord::new(2, 2)), None);
    }

    #[test]
    fn test_later_placement_wins_hit_test() {
        let layout = PreviewLayout::derive(&[CellCoord::new(0, 0)], Some((6, 6)));
        let bottom = placement(0, 0, 3, 3);
        let top = placement(1, 1, 1, 1);
        let placements = [bottom, top.clone()];
        assert_eq!(
            layout.placement_at(&placements, CellCoord::new(1, 1)),
            Some(top.furniture_id)
        );
    }

    #[test]
    fn test_highlight_beats_hover() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut highlight = PreviewHighlight::default();
        highlight.set_hovered(Some(a));
        highlight.set_highlighted(Some(a));
        assert_eq!(highlight.emphasis(a), OverlayEmphasis::Highlighted);

        highlight.set_hovered(Some(b));
        assert_eq!(highlight.emphasis(b), OverlayEmphasis::Hovered);
        assert!(!highlight.is_emphasized(Uuid::new_v4()));

        highlight.clear();
        assert_eq!(highlight.emphasis(a), OverlayEmphasis::Normal);
    }
}
