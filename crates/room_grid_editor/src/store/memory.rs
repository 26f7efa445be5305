//! In-process store with the same validation and cascade rules as the backend

use super::{FurnitureApi, ItemsApi, RoomsApi, SearchApi};
use crate::error::ApiError;
use async_trait::async_trait;
use room_grid_core::validation::{
    validate_create_furniture, validate_create_items, validate_create_room, validate_list_items,
    validate_placement, validate_rename_item, validate_room_cells, validate_search_items,
    validate_update_furniture, validate_update_room,
};
use room_grid_core::{
    CellCoord, CreateFurnitureCommand, CreateItemsRequest, CreateItemsResult, CreateRoomCommand,
    Furniture, FurniturePlacement, Item, ItemSort, ItemSummary, ListItemsQuery, ListRoomsQuery,
    NamedRef, PlacementUpsert, RenameItem, RenamedItem, ReplaceRoomCells, Room, RoomCells,
    RoomCellsSaved, RoomSort, SearchHit, SearchItemsQuery, SearchSort, SortOrder,
    UpdateFurnitureCommand, UpdateRoomCommand,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    rooms: Vec<Room>,
    cells: HashMap<Uuid, Vec<CellCoord>>,
    furniture: Vec<Furniture>,
    placements: HashMap<Uuid, FurniturePlacement>,
    items: Vec<Item>,
    /// Logical clock used for created_at/updated_at
    clock: u64,
}

impl Tables {
    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("{:020}", self.clock)
    }

    fn room_mut(&mut self, room_id: Uuid) -> Result<&mut Room, ApiError> {
        self.rooms
            .iter_mut()
            .find(|room| room.id == room_id)
            .ok_or_else(|| ApiError::not_found("Room not found"))
    }

    fn has_room(&self, room_id: Uuid) -> bool {
        self.rooms.iter().any(|room| room.id == room_id)
    }

    fn ensure_unique_name(&self, name: &str, except: Option<Uuid>) -> Result<(), ApiError> {
        let taken = self
            .rooms
            .iter()
            .any(|room| Some(room.id) != except && room.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(ApiError::conflict("Room name already exists"));
        }
        Ok(())
    }

    fn furniture_mut(&mut self, furniture_id: Uuid) -> Result<&mut Furniture, ApiError> {
        self.furniture
            .iter_mut()
            .find(|item| item.id == furniture_id)
            .ok_or_else(|| ApiError::not_found("Furniture not found"))
    }

    fn item_mut(&mut self, item_id: Uuid) -> Result<&mut Item, ApiError> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ApiError::not_found("Item not found"))
    }

    /// Drop furniture rows and everything hanging off them
    fn remove_furniture(&mut self, removed: &[Uuid]) {
        self.furniture.retain(|item| !removed.contains(&item.id));
        self.items.retain(|item| !removed.contains(&item.furniture_id));
        for furniture_id in removed {
            self.placements.remove(furniture_id);
        }
    }
}

fn page<T>(rows: Vec<T>, limit: Option<u32>, offset: Option<u32>) -> Vec<T> {
    let skip = offset.unwrap_or(0) as usize;
    let take = limit.map_or(usize::MAX, |limit| limit as usize);
    rows.into_iter().skip(skip).take(take).collect()
}

/// Lower is better: exact item name, item name prefix, item name fragment,
/// then furniture name and room name fragments. `None` when nothing matches.
fn relevance(needle: &str, item: &str, furniture: &str, room: &str) -> Option<u8> {
    let item = item.to_lowercase();
    if item == needle {
        Some(0)
    } else if item.starts_with(needle) {
        Some(1)
    } else if item.contains(needle) {
        Some(2)
    } else if furniture.to_lowercase().contains(needle) {
        Some(3)
    } else if room.to_lowercase().contains(needle) {
        Some(4)
    } else {
        None
    }
}

/// Store kept entirely in memory
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, ApiError> {
        self.tables
            .lock()
            .map_err(|_| ApiError::upstream("In-memory store lock poisoned"))
    }

    /// Insert a room and its cells in one step (used to seed demo data)
    pub fn seed_room(
        &self,
        command: CreateRoomCommand,
        cells: Vec<CellCoord>,
    ) -> Result<Room, ApiError> {
        validate_room_cells(&ReplaceRoomCells {
            cells: cells.clone(),
        })
        .map_err(ApiError::validation)?;
        let room = self.insert_room(command)?;
        self.tables()?.cells.insert(room.id, cells);
        Ok(room)
    }

    fn insert_room(&self, command: CreateRoomCommand) -> Result<Room, ApiError> {
        validate_create_room(&command).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        let name = command.name.trim().to_string();
        tables.ensure_unique_name(&name, None)?;

        let now = tables.tick();
        let room = Room {
            id: Uuid::new_v4(),
            name,
            color: command.color,
            x_start: command.x_start,
            y_start: command.y_start,
            width_cells: command.width_cells,
            height_cells: command.height_cells,
            cell_size_m: command.cell_size_m,
            created_at: now.clone(),
            updated_at: now,
        };
        tables.rooms.push(room.clone());
        tracing::info!("Created room '{}' ({})", room.name, room.id);
        Ok(room)
    }
}

#[async_trait]
impl RoomsApi for InMemoryStore {
    async fn list_rooms(&self, query: ListRoomsQuery) -> Result<Vec<Room>, ApiError> {
        let mut rooms = self.tables()?.rooms.clone();
        rooms.sort_by(|a, b| match query.sort {
            RoomSort::CreatedAt => a.created_at.cmp(&b.created_at),
            RoomSort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            RoomSort::Name => a.name.cmp(&b.name),
        });
        if query.order == SortOrder::Desc {
            rooms.reverse();
        }
        Ok(rooms)
    }

    async fn get_room(&self, room_id: Uuid) -> Result<Room, ApiError> {
        let tables = self.tables()?;
        tables
            .rooms
            .iter()
            .find(|room| room.id == room_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Room not found"))
    }

    async fn create_room(&self, command: CreateRoomCommand) -> Result<Room, ApiError> {
        self.insert_room(command)
    }

    async fn update_room(
        &self,
        room_id: Uuid,
        command: UpdateRoomCommand,
    ) -> Result<Room, ApiError> {
        validate_update_room(&command).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        tables.room_mut(room_id)?;
        if let Some(name) = &command.name {
            tables.ensure_unique_name(name.trim(), Some(room_id))?;
        }

        let now = tables.tick();
        let room = tables.room_mut(room_id)?;
        room.apply_update(&command);
        room.name = room.name.trim().to_string();
        room.updated_at = now;
        tracing::info!("Updated room {}", room_id);
        Ok(room.clone())
    }

    async fn delete_room(&self, room_id: Uuid) -> Result<(), ApiError> {
        let mut tables = self.tables()?;
        if !tables.has_room(room_id) {
            return Err(ApiError::not_found("Room not found"));
        }
        tables.rooms.retain(|room| room.id != room_id);
        tables.cells.remove(&room_id);

        let removed: Vec<Uuid> = tables
            .furniture
            .iter()
            .filter(|item| item.room_id == room_id)
            .map(|item| item.id)
            .collect();
        tables.remove_furniture(&removed);
        tracing::info!(
            "Deleted room {} with {} furniture item(s)",
            room_id,
            removed.len()
        );
        Ok(())
    }

    async fn get_room_cells(&self, room_id: Uuid) -> Result<RoomCells, ApiError> {
        let tables = self.tables()?;
        if !tables.has_room(room_id) {
            return Err(ApiError::not_found("Room not found"));
        }
        Ok(RoomCells {
            room_id,
            cells: tables.cells.get(&room_id).cloned().unwrap_or_default(),
        })
    }

    async fn replace_room_cells(
        &self,
        room_id: Uuid,
        request: ReplaceRoomCells,
    ) -> Result<RoomCellsSaved, ApiError> {
        validate_room_cells(&request).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        if !tables.has_room(room_id) {
            return Err(ApiError::not_found("Room not found"));
        }
        let cells_saved = request.cells.len();
        tables.cells.insert(room_id, request.cells);
        tracing::info!("Saved {} cell(s) for room {}", cells_saved, room_id);
        Ok(RoomCellsSaved {
            room_id,
            cells_saved,
        })
    }
}

#[async_trait]
impl FurnitureApi for InMemoryStore {
    async fn list_furniture(&self, room_id: Uuid) -> Result<Vec<Furniture>, ApiError> {
        let tables = self.tables()?;
        let mut items: Vec<Furniture> = tables
            .furniture
            .iter()
            .filter(|item| item.room_id == room_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn create_furniture(
        &self,
        command: CreateFurnitureCommand,
    ) -> Result<Furniture, ApiError> {
        validate_create_furniture(&command).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        if !tables.has_room(command.room_id) {
            return Err(ApiError::not_found("Room not found"));
        }

        let now = tables.tick();
        let furniture = Furniture {
            id: Uuid::new_v4(),
            room_id: command.room_id,
            name: command.name.trim().to_string(),
            description: command.description,
            color: command.color,
            created_at: now.clone(),
            updated_at: now,
        };
        tables.furniture.push(furniture.clone());
        tracing::info!("Created furniture '{}' ({})", furniture.name, furniture.id);
        Ok(furniture)
    }

    async fn update_furniture(
        &self,
        furniture_id: Uuid,
        command: UpdateFurnitureCommand,
    ) -> Result<Furniture, ApiError> {
        validate_update_furniture(&command).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        tables.furniture_mut(furniture_id)?;

        let now = tables.tick();
        let furniture = tables.furniture_mut(furniture_id)?;
        furniture.apply_update(&command);
        furniture.name = furniture.name.trim().to_string();
        furniture.updated_at = now;
        Ok(furniture.clone())
    }

    async fn delete_furniture(&self, furniture_id: Uuid) -> Result<(), ApiError> {
        let mut tables = self.tables()?;
        tables.furniture_mut(furniture_id)?;
        tables.remove_furniture(&[furniture_id]);
        tracing::info!("Deleted furniture {}", furniture_id);
        Ok(())
    }

    async fn get_furniture_placement(
        &self,
        furniture_id: Uuid,
    ) -> Result<FurniturePlacement, ApiError> {
        self.tables()?
            .placements
            .get(&furniture_id)
            .copied()
            .ok_or_else(|| ApiError::not_found("Placement not found"))
    }

    async fn upsert_furniture_placement(
        &self,
        furniture_id: Uuid,
        request: PlacementUpsert,
    ) -> Result<FurniturePlacement, ApiError> {
        validate_placement(&request).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        let owner_room = tables.furniture_mut(furniture_id)?.room_id;
        if owner_room != request.room_id {
            return Err(ApiError::constraint(
                "Placement room does not match the furniture's room",
            ));
        }

        let placement = request.into_placement(furniture_id);
        tables.placements.insert(furniture_id, placement);
        Ok(placement)
    }
}

#[async_trait]
impl ItemsApi for InMemoryStore {
    async fn list_items(&self, query: ListItemsQuery) -> Result<Vec<ItemSummary>, ApiError> {
        validate_list_items(&query).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        tables.furniture_mut(query.furniture_id)?;

        let needle = query.q.as_deref().map(|q| q.trim().to_lowercase());
        let mut items: Vec<&Item> = tables
            .items
            .iter()
            .filter(|item| item.furniture_id == query.furniture_id)
            .filter(|item| {
                needle
                    .as_deref()
                    .map_or(true, |needle| item.name.to_lowercase().contains(needle))
            })
            .collect();
        items.sort_by(|a, b| match query.sort {
            ItemSort::CreatedAt => a.created_at.cmp(&b.created_at),
            ItemSort::Name => a.name.cmp(&b.name),
        });
        if query.order == SortOrder::Desc {
            items.reverse();
        }

        let rows = items.into_iter().map(ItemSummary::from).collect();
        Ok(page(rows, query.limit, query.offset))
    }

    async fn create_items(
        &self,
        furniture_id: Uuid,
        request: CreateItemsRequest,
    ) -> Result<CreateItemsResult, ApiError> {
        validate_create_items(&request).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        tables.furniture_mut(furniture_id)?;

        let mut result = CreateItemsResult::default();
        for name in request.names {
            let now = tables.tick();
            let item = Item {
                id: Uuid::new_v4(),
                furniture_id,
                name: name.trim().to_string(),
                created_at: now.clone(),
                updated_at: now,
            };
            result.created.push(ItemSummary::from(&item));
            tables.items.push(item);
        }
        tracing::info!(
            "Created {} item(s) in furniture {}",
            result.created.len(),
            furniture_id
        );
        Ok(result)
    }

    async fn rename_item(
        &self,
        item_id: Uuid,
        request: RenameItem,
    ) -> Result<RenamedItem, ApiError> {
        validate_rename_item(&request).map_err(ApiError::validation)?;
        let mut tables = self.tables()?;
        tables.item_mut(item_id)?;

        let now = tables.tick();
        let item = tables.item_mut(item_id)?;
        item.name = request.name.trim().to_string();
        item.updated_at = now;
        Ok(RenamedItem {
            id: item.id,
            name: item.name.clone(),
            updated_at: item.updated_at.clone(),
        })
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<(), ApiError> {
        let mut tables = self.tables()?;
        tables.item_mut(item_id)?;
        tables.items.retain(|item| item.id != item_id);
        tracing::info!("Deleted item {}", item_id);
        Ok(())
    }
}

#[async_trait]
impl SearchApi for InMemoryStore {
    async fn search_items(&self, query: SearchItemsQuery) -> Result<Vec<SearchHit>, ApiError> {
        validate_search_items(&query).map_err(ApiError::validation)?;
        let tables = self.tables()?;
        let needle = query.q.trim().to_lowercase();

        let mut ranked: Vec<(u8, &Item, SearchHit)> = tables
            .items
            .iter()
            .filter_map(|item| {
                let furniture = tables.furniture.iter().find(|f| f.id == item.furniture_id)?;
                let room = tables.rooms.iter().find(|r| r.id == furniture.room_id)?;
                let rank = relevance(&needle, &item.name, &furniture.name, &room.name)?;
                let hit = SearchHit {
                    item_id: item.id,
                    item_name: item.name.clone(),
                    furniture: NamedRef {
                        id: furniture.id,
                        name: furniture.name.clone(),
                    },
                    room: NamedRef {
                        id: room.id,
                        name: room.name.clone(),
                    },
                };
                Some((rank, item, hit))
            })
            .collect();

        match query.sort {
            SearchSort::Relevance => ranked.sort_by(|a, b| {
                a.0.cmp(&b.0)
                    .then_with(|| a.1.name.to_lowercase().cmp(&b.1.name.to_lowercase()))
            }),
            SearchSort::Name => ranked.sort_by(|a, b| a.1.name.cmp(&b.1.name)),
            SearchSort::CreatedAt => ranked.sort_by(|a, b| a.1.created_at.cmp(&b.1.created_at)),
        }
        if query.sort != SearchSort::Relevance && query.order == Some(SortOrder::Desc) {
            ranked.reverse();
        }

        let hits = ranked.into_iter().map(|(_, _, hit)| hit).collect();
        Ok(page(hits, query.limit, query.offset))
    }
}
