//! Editor tools - brush and pointer gesture handling
//!
//! [`GridEditorSurface`] turns raw pointer gestures (down, enter, up, click)
//! into [`SurfaceEvent`]s. It owns no grid state beyond the transient drag
//! tracking; the consumer applies the events to its [`RoomGrid`].

use room_grid_core::{CellCoord, RoomGrid};
use serde::{Deserialize, Serialize};

/// Square brush footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushSize {
    /// 1x1
    #[default]
    Single,
    /// 3x3
    Medium,
    /// 5x5
    Large,
}

impl BrushSize {
    pub const ALL: [BrushSize; 3] = [BrushSize::Single, BrushSize::Medium, BrushSize::Large];

    /// Snap an arbitrary size to 1, 3 or 5 (<= 1 -> 1, <= 3 -> 3, else 5)
    pub fn normalize(size: i32) -> Self {
        if size <= 1 {
            BrushSize::Single
        } else if size <= 3 {
            BrushSize::Medium
        } else {
            BrushSize::Large
        }
    }

    /// Side length in cells
    pub fn side(&self) -> i32 {
        match self {
            BrushSize::Single => 1,
            BrushSize::Medium => 3,
            BrushSize::Large => 5,
        }
    }

    pub fn radius(&self) -> i32 {
        self.side() / 2
    }

    pub fn label(&self) -> &'static str {
        match self {
            BrushSize::Single => "1x1",
            BrushSize::Medium => "3x3",
            BrushSize::Large => "5x5",
        }
    }
}

/// Message emitted by the editor surface for each brush cell it attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SurfaceEvent {
    SetCell { cell: CellCoord, filled: bool },
}

impl SurfaceEvent {
    /// Apply to the grid through `set_cell`; rejected fills stay no-ops
    pub fn apply(self, grid: &mut RoomGrid) {
        match self {
            SurfaceEvent::SetCell { cell, filled } => {
                grid.set_cell(cell, filled);
            }
        }
    }
}

pub fn apply_event(grid: &mut RoomGrid, event: SurfaceEvent) {
    event.apply(grid);
}

/// Apply a batch of events in emission order
pub fn apply_events<I>(grid: &mut RoomGrid, events: I)
where
    I: IntoIterator<Item = SurfaceEvent>,
{
    for event in events {
        apply_event(grid, event);
    }
}

/// Pointer gesture state for the grid editor
#[derive(Debug, Clone)]
pub struct GridEditorSurface {
    pub brush: BrushSize,
    is_dragging: bool,
    /// Value painted for the whole stroke, decided on pointer down
    drag_fill: bool,
    /// The click the platform fires after a pointer down/up pair
    suppress_click: bool,
}

impl Default for GridEditorSurface {
    fn default() -> Self {
        Self {
            brush: BrushSize::default(),
            is_dragging: false,
            drag_fill: true,
            suppress_click: false,
        }
    }
}

impl GridEditorSurface {
    pub fn new(brush: BrushSize) -> Self {
        Self {
            brush,
            ..Default::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn drag_fill(&self) -> bool {
        self.drag_fill
    }

    pub fn set_brush_size(&mut self, size: i32) {
        self.brush = BrushSize::normalize(size);
    }

    /// On-board cells covered by the brush centred on `center`, row-major
    pub fn brush_cells(&self, grid: &RoomGrid, center: CellCoord) -> Vec<CellCoord> {
        let radius = self.brush.radius();
        let mut cells = Vec::with_capacity((self.brush.side() * self.brush.side()) as usize);
        for y in center.y - radius..=center.y + radius {
            for x in center.x - radius..=center.x + radius {
                let target = CellCoord::new(x, y);
                if grid.contains(target) {
                    cells.push(target);
                }
            }
        }
        cells
    }

    fn apply_brush(
        &self,
        grid: &RoomGrid,
        center: CellCoord,
        filled: bool,
        emit: &mut impl FnMut(SurfaceEvent),
    ) {
        for cell in self.brush_cells(grid, center) {
            emit(SurfaceEvent::SetCell { cell, filled });
        }
    }

    /// Start a stroke. Starting on an empty cell paints, on a filled cell erases.
    pub fn pointer_down(
        &mut self,
        grid: &RoomGrid,
        cell: CellCoord,
        mut emit: impl FnMut(SurfaceEvent),
    ) {
        if !grid.contains(cell) {
            return;
        }
        self.suppress_click = true;
        self.is_dragging = true;
        self.drag_fill = !grid.is_filled(cell);
        self.apply_brush(grid, cell, self.drag_fill, &mut emit);
    }

    /// Continue a stroke over another cell
    pub fn pointer_enter(
        &mut self,
        grid: &RoomGrid,
        cell: CellCoord,
        mut emit: impl FnMut(SurfaceEvent),
    ) {
        if !self.is_dragging || !grid.contains(cell) {
            return;
        }
        self.apply_brush(grid, cell, self.drag_fill, &mut emit);
    }

    /// End a stroke (pointer released anywhere)
    pub fn pointer_up(&mut self) {
        self.is_dragging = false;
    }

    /// Click on a cell. The first click after a pointer down is swallowed.
    pub fn click(&mut self, grid: &RoomGrid, cell: CellCoord, mut emit: impl FnMut(SurfaceEvent)) {
        if self.suppress_click {
            self.suppress_click = false;
            return;
        }
        if !grid.contains(cell) {
            return;
        }
        self.apply_brush(grid, cell, !grid.is_filled(cell), &mut emit);
    }
}
