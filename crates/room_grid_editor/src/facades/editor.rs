use super::{room_id, StateChannel};
use crate::error::ApiError;
use crate::store::RoomsApi;
use room_grid_core::{
    CellCoord, CreateRoomCommand, ReplaceRoomCells, Room, RoomCellsSaved, UpdateRoomCommand,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomEditorState {
    pub room: Option<Room>,
    pub cells: Vec<CellCoord>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub error: Option<ApiError>,
    pub not_found: bool,
}

/// Create/edit room page
pub struct RoomEditorFacade {
    rooms_api: Arc<dyn RoomsApi>,
    state: StateChannel<RoomEditorState>,
}

impl RoomEditorFacade {
    pub fn new(rooms_api: Arc<dyn RoomsApi>) -> Self {
        Self {
            rooms_api,
            state: StateChannel::default(),
        }
    }

    pub fn snapshot(&self) -> RoomEditorState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoomEditorState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.reset();
    }

    pub async fn load(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = match room_id(raw_id) {
            Ok(id) => id,
            Err(error) => {
                self.state.patch(|state| {
                    state.error = Some(error.clone());
                    state.not_found = true;
                });
                return Err(error);
            }
        };

        let started = self.state.patch_if(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error = None;
            state.not_found = false;
            true
        });
        if !started {
            return Ok(());
        }

        let fetched = futures::try_join!(
            self.rooms_api.get_room(id),
            self.rooms_api.get_room_cells(id)
        );
        match fetched {
            Ok((room, cells)) => {
                debug!("Editing room {} ({} cell(s))", id, cells.cells.len());
                self.state.patch(|state| {
                    state.room = Some(room);
                    state.cells = cells.cells;
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(error) if error.is_not_found() => {
                self.state.patch(|state| {
                    state.room = None;
                    state.cells.clear();
                    state.is_loading = false;
                    state.not_found = true;
                    state.error = None;
                });
                Ok(())
            }
            Err(error) => {
                self.state.patch(|state| {
                    state.is_loading = false;
                    state.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    fn begin_save(&self) {
        self.state.patch(|state| {
            state.is_saving = true;
            state.error = None;
        });
    }

    fn save_failed(&self, error: ApiError) -> ApiError {
        self.state.patch(|state| {
            state.is_saving = false;
            state.error = Some(error.clone());
        });
        error
    }

    pub async fn create_room(&self, command: CreateRoomCommand) -> Result<Room, ApiError> {
        self.begin_save();
        let room = self
            .rooms_api
            .create_room(command)
            .await
            .map_err(|error| self.save_failed(error))?;
        self.state.patch(|state| {
            state.room = Some(room.clone());
            state.is_saving = false;
        });
        Ok(room)
    }

    /// Merge the present fields into the loaded room at once; restore it if
    /// the store refuses.
    pub async fn update_room(
        &self,
        room_id: Uuid,
        command: UpdateRoomCommand,
    ) -> Result<Room, ApiError> {
        let previous = self.state.snapshot().room;
        self.state.patch(|state| {
            if let Some(room) = state.room.as_mut().filter(|room| room.id == room_id) {
                room.apply_update(&command);
            }
            state.is_saving = true;
            state.error = None;
        });

        match self.rooms_api.update_room(room_id, command).await {
            Ok(room) => {
                self.state.patch(|state| {
                    if state.room.as_ref().map_or(true, |current| current.id == room.id) {
                        state.room = Some(room.clone());
                    }
                    state.is_saving = false;
                });
                Ok(room)
            }
            Err(error) => {
                warn!("Updating room {} failed, restoring: {}", room_id, error);
                self.state.patch(|state| state.room = previous);
                Err(self.save_failed(error))
            }
        }
    }

    /// Replace the room's cells, showing the new shape before the store confirms
    pub async fn replace_room_cells(
        &self,
        room_id: Uuid,
        cells: Vec<CellCoord>,
    ) -> Result<RoomCellsSaved, ApiError> {
        let previous = self.state.snapshot().cells;
        self.state.patch(|state| {
            state.cells = cells.clone();
            state.is_saving = true;
            state.error = None;
        });

        match self
            .rooms_api
            .replace_room_cells(room_id, ReplaceRoomCells { cells })
            .await
        {
            Ok(saved) => {
                info!("Room {} now has {} cell(s)", room_id, saved.cells_saved);
                self.state.patch(|state| state.is_saving = false);
                Ok(saved)
            }
            Err(error) => {
                warn!("Saving cells of {} failed, restoring: {}", room_id, error);
                self.state.patch(|state| state.cells = previous);
                Err(self.save_failed(error))
            }
        }
    }
}
