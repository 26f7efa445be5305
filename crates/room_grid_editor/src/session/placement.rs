use crate::error::ApiError;
use crate::render::PreviewLayout;
use crate::tools::{apply_events, BrushSize, GridEditorSurface, SurfaceEvent};
use room_grid_core::{CellCoord, GridBounds, PlacementUpsert, RoomGrid};
use uuid::Uuid;

/// Furniture placement dialog.
///
/// The board is the room's shape with two empty cells of context on every
/// side. Only the room's own cells may be painted; the painted area's bounding
/// box becomes the placement.
#[derive(Debug, Clone)]
pub struct PlacementSession {
    pub grid: RoomGrid,
    pub surface: GridEditorSurface,
    layout: PreviewLayout,
}

impl PlacementSession {
    /// `existing` is a placement in room coordinates to start from
    pub fn new(room_cells: &[CellCoord], existing: Option<GridBounds>) -> Self {
        let layout = PreviewLayout::derive(room_cells, None);
        let mut grid = RoomGrid::new(layout.width, layout.height, false);
        grid.apply_allowed_cells(layout.render_cells(room_cells));
        if let Some(bounds) = existing {
            grid.fill_rectangle(layout.to_render_rect(bounds));
        }

        Self {
            grid,
            surface: GridEditorSurface::new(BrushSize::Single),
            layout,
        }
    }

    pub fn layout(&self) -> PreviewLayout {
        self.layout
    }

    pub fn set_brush_size(&mut self, size: i32) {
        self.surface.set_brush_size(size);
    }

    pub fn handle(&mut self, event: SurfaceEvent) {
        event.apply(&mut self.grid);
    }

    pub fn handle_all(&mut self, events: Vec<SurfaceEvent>) {
        apply_events(&mut self.grid, events);
    }

    /// Painted area in room coordinates
    pub fn selection(&self) -> Option<GridBounds> {
        self.grid
            .bounds()
            .map(|bounds| bounds.translate(-self.layout.offset_x, -self.layout.offset_y))
    }

    pub fn submit(&self, room_id: Uuid) -> Result<PlacementUpsert, ApiError> {
        let bounds = self.selection().ok_or_else(|| {
            ApiError::invalid_field("placement", "Choose a spot for the furniture")
        })?;
        Ok(PlacementUpsert::from_bounds(room_id, bounds))
    }
}
