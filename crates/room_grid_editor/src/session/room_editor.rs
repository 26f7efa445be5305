use super::DEFAULT_ROOM_COLOR;
use crate::error::ApiError;
use crate::facades::RoomEditorFacade;
use crate::tools::{apply_events, BrushSize, GridEditorSurface, SurfaceEvent};
use room_grid_core::{
    CellCoord, CreateRoomCommand, GridBounds, Room, RoomGrid, UpdateRoomCommand, MAX_GRID_SIDE,
};
use uuid::Uuid;

/// Create/edit room screen: the board, the brush and the name/color form
#[derive(Debug, Clone)]
pub struct RoomEditorSession {
    pub grid: RoomGrid,
    pub surface: GridEditorSurface,
    pub name: String,
    pub color: String,
    room_id: Option<Uuid>,
    side: i32,
}

impl Default for RoomEditorSession {
    fn default() -> Self {
        Self::new(MAX_GRID_SIDE, BrushSize::default())
    }
}

impl RoomEditorSession {
    pub fn new(side: i32, brush: BrushSize) -> Self {
        Self {
            grid: RoomGrid::new(side, side, false),
            surface: GridEditorSurface::new(brush),
            name: String::new(),
            color: DEFAULT_ROOM_COLOR.to_string(),
            room_id: None,
            side,
        }
    }

    /// Id of the room being edited, `None` while creating
    pub fn room_id(&self) -> Option<Uuid> {
        self.room_id
    }

    /// Switch to editing an existing room
    pub fn load(&mut self, room: &Room, cells: &[CellCoord]) {
        self.room_id = Some(room.id);
        self.name = room.name.clone();
        self.color = room.color.clone();
        self.load_cells(cells);
    }

    /// Replace the board with the given cells, in the order given
    pub fn load_cells(&mut self, cells: &[CellCoord]) {
        self.grid = RoomGrid::new(self.side, self.side, false);
        self.grid.apply_cells(cells.iter().copied());
    }

    /// Back to an empty "new room" form
    pub fn reset(&mut self) {
        let brush = self.surface.brush;
        *self = Self::new(self.side, brush);
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

    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty() && !self.color.trim().is_empty()
    }

    fn shape(&self) -> Result<(GridBounds, Vec<CellCoord>), ApiError> {
        match self.grid.bounds() {
            Some(bounds) => Ok((bounds, self.grid.filled_cells())),
            None => Err(ApiError::invalid_field(
                "cells",
                "Select at least one grid cell",
            )),
        }
    }

    pub fn build_create_command(&self) -> Result<(CreateRoomCommand, Vec<CellCoord>), ApiError> {
        let (bounds, cells) = self.shape()?;
        let command = CreateRoomCommand::from_bounds(self.name.trim(), self.color.trim(), bounds);
        Ok((command, cells))
    }

    pub fn build_update_command(&self) -> Result<(UpdateRoomCommand, Vec<CellCoord>), ApiError> {
        let (bounds, cells) = self.shape()?;
        let command = UpdateRoomCommand {
            name: Some(self.name.trim().to_string()),
            color: Some(self.color.trim().to_string()),
            ..Default::default()
        }
        .with_bounds(bounds);
        Ok((command, cells))
    }

    /// Create or update the room, then replace its cells. Returns the room id.
    pub async fn save(&mut self, facade: &RoomEditorFacade) -> Result<Uuid, ApiError> {
        match self.room_id {
            Some(room_id) => {
                let (command, cells) = self.build_update_command()?;
                facade.update_room(room_id, command).await?;
                facade.replace_room_cells(room_id, cells).await?;
                Ok(room_id)
            }
            None => {
                let (command, cells) = self.build_create_command()?;
                let room = facade.create_room(command).await?;
                self.room_id = Some(room.id);
                facade.replace_room_cells(room.id, cells).await?;
                Ok(room.id)
            }
        }
    }
}
