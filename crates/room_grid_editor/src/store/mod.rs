//! Remote store boundary
//!
//! The facades talk to the backend only through these traits. Implementations
//! map their own failures onto [`ApiError`]; [`InMemoryStore`] is the local
//! implementation used by the host app and the tests.

mod memory;

pub use memory::InMemoryStore;

use crate::error::ApiError;
use async_trait::async_trait;
use room_grid_core::{
    CreateFurnitureCommand, CreateItemsRequest, CreateItemsResult, CreateRoomCommand, Furniture,
    FurniturePlacement, ItemSummary, ListItemsQuery, ListRoomsQuery, PlacementUpsert, RenameItem,
    RenamedItem, ReplaceRoomCells, Room, RoomCells, RoomCellsSaved, SearchHit, SearchItemsQuery,
    UpdateFurnitureCommand, UpdateRoomCommand,
};
use uuid::Uuid;

#[async_trait]
pub trait RoomsApi: Send + Sync {
    async fn list_rooms(&self, query: ListRoomsQuery) -> Result<Vec<Room>, ApiError>;

    async fn get_room(&self, room_id: Uuid) -> Result<Room, ApiError>;

    async fn create_room(&self, command: CreateRoomCommand) -> Result<Room, ApiError>;

    async fn update_room(&self, room_id: Uuid, command: UpdateRoomCommand)
        -> Result<Room, ApiError>;

    /// Removes the room together with its cells, furniture and placements
    async fn delete_room(&self, room_id: Uuid) -> Result<(), ApiError>;

    async fn get_room_cells(&self, room_id: Uuid) -> Result<RoomCells, ApiError>;

    /// Full replace: previous cells are deleted, the given list is inserted
    async fn replace_room_cells(
        &self,
        room_id: Uuid,
        request: ReplaceRoomCells,
    ) -> Result<RoomCellsSaved, ApiError>;
}

#[async_trait]
pub trait FurnitureApi: Send + Sync {
    /// Furniture of one room, newest first
    async fn list_furniture(&self, room_id: Uuid) -> Result<Vec<Furniture>, ApiError>;

    async fn create_furniture(&self, command: CreateFurnitureCommand)
        -> Result<Furniture, ApiError>;

    async fn update_furniture(
        &self,
        furniture_id: Uuid,
        command: UpdateFurnitureCommand,
    ) -> Result<Furniture, ApiError>;

    /// Removes the furniture with its placement and items
    async fn delete_furniture(&self, furniture_id: Uuid) -> Result<(), ApiError>;

    async fn get_furniture_placement(
        &self,
        furniture_id: Uuid,
    ) -> Result<FurniturePlacement, ApiError>;

    /// Insert or replace the placement keyed by `furniture_id`
    async fn upsert_furniture_placement(
        &self,
        furniture_id: Uuid,
        request: PlacementUpsert,
    ) -> Result<FurniturePlacement, ApiError>;
}

#[async_trait]
pub trait ItemsApi: Send + Sync {
    async fn list_items(&self, query: ListItemsQuery) -> Result<Vec<ItemSummary>, ApiError>;

    /// Names are inserted one by one; a name the store refuses is reported in
    /// `failed` without aborting the rest. 401 still aborts the whole call.
    async fn create_items(
        &self,
        furniture_id: Uuid,
        request: CreateItemsRequest,
    ) -> Result<CreateItemsResult, ApiError>;

    async fn rename_item(&self, item_id: Uuid, request: RenameItem)
        -> Result<RenamedItem, ApiError>;

    async fn delete_item(&self, item_id: Uuid) -> Result<(), ApiError>;
}

#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Items whose own, furniture or room name contains the query. Items whose
    /// furniture or room no longer exists are left out.
    async fn search_items(&self, query: SearchItemsQuery) -> Result<Vec<SearchHit>, ApiError>;
}
