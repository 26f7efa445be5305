//! Store double that fails selected operations on demand

use crate::error::ApiError;
use crate::store::{FurnitureApi, InMemoryStore, ItemsApi, RoomsApi, SearchApi};
use async_trait::async_trait;
use room_grid_core::{
    CellCoord, CreateFurnitureCommand, CreateItemsRequest, CreateItemsResult, CreateRoomCommand,
    Furniture, FurniturePlacement, GridBounds, ItemCreateFailure, ItemSummary, ListItemsQuery,
    ListRoomsQuery, PlacementUpsert, RenameItem, RenamedItem, ReplaceRoomCells, Room, RoomCells,
    RoomCellsSaved, SearchHit, SearchItemsQuery, UpdateFurnitureCommand, UpdateRoomCommand,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    failing: Mutex<HashSet<&'static str>>,
    /// Item names `create_items` reports as failed instead of inserting
    refused_names: Mutex<HashSet<String>>,
    /// When set, `list_rooms` waits for a notification before answering
    pub list_gate: Option<Arc<Notify>>,
    pub list_calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_gate(gate: Arc<Notify>) -> Self {
        Self {
            list_gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn heal(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn refuse_item_name(&self, name: &str) {
        self.refused_names.lock().unwrap().insert(name.to_string());
    }

    fn check(&self, operation: &'static str) -> Result<(), ApiError> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ApiError::upstream(format!("{} failed", operation)));
        }
        Ok(())
    }

    /// Seed an L-shaped room and return it
    pub fn seed_room(&self, name: &str) -> Room {
        let cells = vec![
            CellCoord::new(3, 4),
            CellCoord::new(4, 4),
            CellCoord::new(5, 4),
            CellCoord::new(3, 5),
        ];
        self.inner
            .seed_room(
                CreateRoomCommand::from_bounds(
                    name,
                    "#aabbcc",
                    GridBounds::new(3, 4, 3, 2),
                ),
                cells,
            )
            .unwrap()
    }

    pub async fn seed_furniture(&self, room_id: Uuid, name: &str, placed: bool) -> Furniture {
        let furniture = self
            .inner
            .create_furniture(CreateFurnitureCommand {
                room_id,
                name: name.to_string(),
                description: None,
                color: "#ff1744".to_string(),
            })
            .await
            .unwrap();
        if placed {
            self.inner
                .upsert_furniture_placement(
                    furniture.id,
                    PlacementUpsert::from_bounds(room_id, GridBounds::new(3, 4, 1, 1)),
                )
                .await
                .unwrap();
        }
        furniture
    }
}

#[async_trait]
impl RoomsApi for FlakyStore {
    async fn list_rooms(&self, query: ListRoomsQuery) -> Result<Vec<Room>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        self.check("list_rooms")?;
        self.inner.list_rooms(query).await
    }

    async fn get_room(&self, room_id: Uuid) -> Result<Room, ApiError> {
        self.check("get_room")?;
        self.inner.get_room(room_id).await
    }

    async fn create_room(&self, command: CreateRoomCommand) -> Result<Room, ApiError> {
        self.check("create_room")?;
        self.inner.create_room(command).await
    }

    async fn update_room(
        &self,
        room_id: Uuid,
        command: UpdateRoomCommand,
    ) -> Result<Room, ApiError> {
        self.check("update_room")?;
        self.inner.update_room(room_id, command).await
    }

    async fn delete_room(&self, room_id: Uuid) -> Result<(), ApiError> {
        self.check("delete_room")?;
        self.inner.delete_room(room_id).await
    }

    async fn get_room_cells(&self, room_id: Uuid) -> Result<RoomCells, ApiError> {
        self.check("get_room_cells")?;
        self.inner.get_room_cells(room_id).await
    }

    async fn replace_room_cells(
        &self,
        room_id: Uuid,
        request: ReplaceRoomCells,
    ) -> Result<RoomCellsSaved, ApiError> {
        self.check("replace_room_cells")?;
        self.inner.replace_room_cells(room_id, request).await
    }
}

#[async_trait]
impl FurnitureApi for FlakyStore {
    async fn list_furniture(&self, room_id: Uuid) -> Result<Vec<Furniture>, ApiError> {
        self.check("list_furniture")?;
        self.inner.list_furniture(room_id).await
    }

    async fn create_furniture(
        &self,
        command: CreateFurnitureCommand,
    ) -> Result<Furniture, ApiError> {
        self.check("create_furniture")?;
        self.inner.create_furniture(command).await
    }

    async fn update_furniture(
        &self,
        furniture_id: Uuid,
        command: UpdateFurnitureCommand,
    ) -> Result<Furniture, ApiError> {
        self.check("update_furniture")?;
        self.inner.update_furniture(furniture_id, command).await
    }

    async fn delete_furniture(&self, furniture_id: Uuid) -> Result<(), ApiError> {
        self.check("delete_furniture")?;
        self.inner.delete_furniture(furniture_id).await
    }

    async fn get_furniture_placement(
        &self,
        furniture_id: Uuid,
    ) -> Result<FurniturePlacement, ApiError> {
        self.check("get_furniture_placement")?;
        self.inner.get_furniture_placement(furniture_id).await
    }

    async fn upsert_furniture_placement(
        &self,
        furniture_id: Uuid,
        request: PlacementUpsert,
    ) -> Result<FurniturePlacement, ApiError> {
        self.check("upsert_furniture_placement")?;
        self.inner
            .upsert_furniture_placement(furniture_id, request)
            .await
    }
}

#[async_trait]
impl ItemsApi for FlakyStore {
    async fn list_items(&self, query: ListItemsQuery) -> Result<Vec<ItemSummary>, ApiError> {
        self.check("list_items")?;
        self.inner.list_items(query).await
    }

    async fn create_items(
        &self,
        furniture_id: Uuid,
        request: CreateItemsRequest,
    ) -> Result<CreateItemsResult, ApiError> {
        self.check("create_items")?;
        let refused = self.refused_names.lock().unwrap().clone();
        let (rejected, accepted): (Vec<String>, Vec<String>) = request
            .names
            .into_iter()
            .partition(|name| refused.contains(name.trim()));

        let mut result = if accepted.is_empty() {
            CreateItemsResult::default()
        } else {
            self.inner
                .create_items(furniture_id, CreateItemsRequest { names: accepted })
                .await?
        };
        result.failed.extend(rejected.into_iter().map(|name| ItemCreateFailure {
            name,
            error: Some("Item violates a store constraint".to_string()),
        }));
        Ok(result)
    }

    async fn rename_item(
        &self,
        item_id: Uuid,
        request: RenameItem,
    ) -> Result<RenamedItem, ApiError> {
        self.check("rename_item")?;
        self.inner.rename_item(item_id, request).await
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<(), ApiError> {
        self.check("delete_item")?;
        self.inner.delete_item(item_id).await
    }
}

#[async_trait]
impl SearchApi for FlakyStore {
    async fn search_items(&self, query: SearchItemsQuery) -> Result<Vec<SearchHit>, ApiError> {
        self.check("search_items")?;
        self.inner.search_items(query).await
    }
}
