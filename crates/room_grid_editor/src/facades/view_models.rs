//! View models held in facade state

use room_grid_core::{
    CreateFurnitureCommand, Furniture, FurniturePlacement, GridBounds, Room, SearchHit,
    UpdateFurnitureCommand,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the rooms list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListItem {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub updated_at: String,
}

impl From<&Room> for RoomListItem {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            color: room.color.clone(),
            updated_at: room.updated_at.clone(),
        }
    }
}

/// Row of a room's furniture list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureListItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub updated_at: String,
}

impl From<&Furniture> for FurnitureListItem {
    fn from(furniture: &Furniture) -> Self {
        Self {
            id: furniture.id,
            name: furniture.name.clone(),
            description: furniture.description.clone(),
            color: furniture.color.clone(),
            updated_at: furniture.updated_at.clone(),
        }
    }
}

/// A placement joined with the display fields of its furniture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementView {
    pub furniture_id: Uuid,
    pub room_id: Uuid,
    pub x: i32,
    pub y: i32,
    pub width_cells: i32,
    pub height_cells: i32,
    pub color: String,
    pub name: String,
}

impl PlacementView {
    /// `furniture_id` is used when the stored record omits it
    pub fn from_placement(
        placement: &FurniturePlacement,
        furniture_id: Uuid,
        color: &str,
        name: &str,
    ) -> Self {
        Self {
            furniture_id: placement.furniture_id.unwrap_or(furniture_id),
            room_id: placement.room_id,
            x: placement.x,
            y: placement.y,
            width_cells: placement.width_cells,
            height_cells: placement.height_cells,
            color: color.to_string(),
            name: name.to_string(),
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.x, self.y, self.width_cells, self.height_cells)
    }
}

/// Form payload for creating or editing furniture
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FurniturePayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub color: String,
}

impl FurniturePayload {
    pub fn into_create(self, room_id: Uuid) -> CreateFurnitureCommand {
        CreateFurnitureCommand {
            room_id,
            name: self.name,
            description: self.description,
            color: self.color,
        }
    }

    pub fn into_update(self) -> UpdateFurnitureCommand {
        UpdateFurnitureCommand {
            name: Some(self.name),
            description: self.description,
            color: Some(self.color),
        }
    }
}

/// One search result flattened for display; opening it leads to the room
/// with the furniture selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultView {
    pub item_id: Uuid,
    pub item_name: String,
    pub furniture_id: Uuid,
    pub furniture_name: String,
    pub room_id: Uuid,
    pub room_name: String,
}

impl From<&SearchHit> for SearchResultView {
    fn from(hit: &SearchHit) -> Self {
        Self {
            item_id: hit.item_id,
            item_name: hit.item_name.clone(),
            furniture_id: hit.furniture.id,
            furniture_name: hit.furniture.name.clone(),
            room_id: hit.room.id,
            room_name: hit.room.name.clone(),
        }
    }
}
