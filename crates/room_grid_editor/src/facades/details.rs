use super::{room_id, FurnitureListItem, FurniturePayload, PlacementView, StateChannel};
use crate::error::ApiError;
use crate::store::{FurnitureApi, RoomsApi};
use futures::future::join_all;
use room_grid_core::{CellCoord, Furniture, PlacementUpsert, Room};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomDetailsState {
    pub room: Option<Room>,
    pub cells: Vec<CellCoord>,
    pub furniture: Vec<FurnitureListItem>,
    pub placements: Vec<PlacementView>,
    pub is_loading: bool,
    pub error: Option<ApiError>,
    pub not_found: bool,
}

/// Room details page: the room, its cells, its furniture and their placements
pub struct RoomDetailsFacade {
    rooms_api: Arc<dyn RoomsApi>,
    furniture_api: Arc<dyn FurnitureApi>,
    state: StateChannel<RoomDetailsState>,
}

impl RoomDetailsFacade {
    pub fn new(rooms_api: Arc<dyn RoomsApi>, furniture_api: Arc<dyn FurnitureApi>) -> Self {
        Self {
            rooms_api,
            furniture_api,
            state: StateChannel::default(),
        }
    }

    pub fn snapshot(&self) -> RoomDetailsState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoomDetailsState> {
        self.state.subscribe()
    }

    /// Current room cells, e.g. to seed a placement dialog
    pub fn snapshot_cells(&self) -> Vec<CellCoord> {
        self.state.snapshot().cells
    }

    pub fn reset(&self) {
        self.state.reset();
    }

    fn fail(&self, error: ApiError) -> ApiError {
        self.state.patch(|state| state.error = Some(error.clone()));
        error
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
            debug!("Room {} already loading, skipping", id);
            return Ok(());
        }

        let fetched = futures::try_join!(
            self.rooms_api.get_room(id),
            self.rooms_api.get_room_cells(id),
            self.furniture_api.list_furniture(id),
        );

        match fetched {
            Ok((room, cells, furniture)) => {
                let placements = self.load_placements(&furniture).await;
                debug!(
                    "Loaded room {} with {} cell(s), {} furniture, {} placement(s)",
                    id,
                    cells.cells.len(),
                    furniture.len(),
                    placements.len()
                );
                self.state.patch(|state| {
                    state.room = Some(room);
                    state.cells = cells.cells;
                    state.furniture = furniture.iter().map(FurnitureListItem::from).collect();
                    state.placements = placements;
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(error) if error.is_not_found() => {
                debug!("Room {} not found", id);
                self.state.replace(RoomDetailsState {
                    not_found: true,
                    ..Default::default()
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

    /// Placements fetched concurrently; furniture without one is skipped
    async fn load_placements(&self, furniture: &[Furniture]) -> Vec<PlacementView> {
        let fetches = furniture.iter().map(|item| async move {
            match self.furniture_api.get_furniture_placement(item.id).await {
                Ok(placement) => Some(PlacementView::from_placement(
                    &placement,
                    item.id,
                    &item.color,
                    &item.name,
                )),
                Err(error) => {
                    if !error.is_not_found() {
                        warn!("Failed to load placement of {}: {}", item.id, error);
                    }
                    None
                }
            }
        });
        join_all(fetches).await.into_iter().flatten().collect()
    }

    /// Create furniture, then its placement when given. The list only changes
    /// once the store has assigned an id.
    pub async fn create_furniture(
        &self,
        raw_room_id: &str,
        payload: FurniturePayload,
        placement: Option<PlacementUpsert>,
    ) -> Result<Furniture, ApiError> {
        let id = room_id(raw_room_id).map_err(|error| self.fail(error))?;

        let created = self
            .furniture_api
            .create_furniture(payload.into_create(id))
            .await
            .map_err(|error| self.fail(error))?;

        self.state.patch(|state| {
            state.furniture.insert(0, FurnitureListItem::from(&created));
            state.error = None;
        });

        if let Some(request) = placement {
            let stored = self
                .furniture_api
                .upsert_furniture_placement(created.id, request)
                .await
                .map_err(|error| self.fail(error))?;
            let view =
                PlacementView::from_placement(&stored, created.id, &created.color, &created.name);
            self.state.patch(|state| state.placements.insert(0, view));
        }
        Ok(created)
    }

    /// Update furniture fields and optionally its placement. The list and the
    /// overlay change immediately; a rejected update restores both. A rejected
    /// placement keeps the field update and restores only the placement.
    pub async fn update_furniture(
        &self,
        furniture_id: Uuid,
        payload: FurniturePayload,
        placement: Option<PlacementUpsert>,
    ) -> Result<Furniture, ApiError> {
        let previous = self.state.snapshot();
        self.state.patch(|state| {
            for item in state.furniture.iter_mut().filter(|item| item.id == furniture_id) {
                item.name = payload.name.clone();
                item.color = payload.color.clone();
                if payload.description.is_some() {
                    item.description = payload.description.clone();
                }
            }
            for view in state
                .placements
                .iter_mut()
                .filter(|view| view.furniture_id == furniture_id)
            {
                view.name = payload.name.clone();
                view.color = payload.color.clone();
            }
            state.error = None;
        });

        let updated = match self
            .furniture_api
            .update_furniture(furniture_id, payload.into_update())
            .await
        {
            Ok(updated) => updated,
            Err(error) => {
                warn!("Updating furniture {} failed, restoring: {}", furniture_id, error);
                self.state.patch(|state| {
                    state.furniture = previous.furniture;
                    state.placements = previous.placements;
                    state.error = Some(error.clone());
                });
                return Err(error);
            }
        };

        self.state.patch(|state| {
            for item in state.furniture.iter_mut().filter(|item| item.id == furniture_id) {
                *item = FurnitureListItem::from(&updated);
            }
        });

        let Some(request) = placement else {
            return Ok(updated);
        };

        let before_upsert = self.state.snapshot().placements;
        let optimistic = PlacementView::from_placement(
            &request.into_placement(furniture_id),
            furniture_id,
            &updated.color,
            &updated.name,
        );
        self.state.patch(|state| upsert_view(&mut state.placements, optimistic));

        match self
            .furniture_api
            .upsert_furniture_placement(furniture_id, request)
            .await
        {
            Ok(stored) => {
                let view = PlacementView::from_placement(
                    &stored,
                    furniture_id,
                    &updated.color,
                    &updated.name,
                );
                self.state.patch(|state| upsert_view(&mut state.placements, view));
                Ok(updated)
            }
            Err(error) => {
                warn!("Placement of {} rejected, restoring: {}", furniture_id, error);
                self.state.patch(|state| {
                    state.placements = before_upsert;
                    state.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    /// Remove furniture and its overlay right away; restore both if the store refuses
    pub async fn delete_furniture(&self, furniture_id: Uuid) -> Result<(), ApiError> {
        let previous = self.state.snapshot();
        self.state.patch(|state| {
            state.furniture.retain(|item| item.id != furniture_id);
            state.placements.retain(|view| view.furniture_id != furniture_id);
            state.error = None;
        });

        if let Err(error) = self.furniture_api.delete_furniture(furniture_id).await {
            warn!("Deleting furniture {} failed, restoring: {}", furniture_id, error);
            self.state.patch(|state| {
                state.furniture = previous.furniture;
                state.placements = previous.placements;
                state.error = Some(error.clone());
            });
            return Err(error);
        }
        Ok(())
    }
}

/// Replace the view for the same furniture, or put it first
fn upsert_view(placements: &mut Vec<PlacementView>, view: PlacementView) {
    match placements
        .iter_mut()
        .find(|existing| existing.furniture_id == view.furniture_id)
    {
        Some(existing) => *existing = view,
        None => placements.insert(0, view),
    }
}
