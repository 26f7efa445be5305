//! Records exchanged with the remote store: rooms, room cells, furniture,
//! furniture placements, the items kept in furniture and item search

use crate::{CellCoord, GridBounds, CELL_SIZE_M};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    /// Hex color, e.g. "#aabbcc"
    pub color: String,
    pub x_start: i32,
    pub y_start: i32,
    pub width_cells: i32,
    pub height_cells: i32,
    pub cell_size_m: f32,
    pub created_at: String,
    pub updated_at: String,
}

impl Room {
    /// Copy every present field of the update onto this room
    pub fn apply_update(&mut self, update: &UpdateRoomCommand) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        if let Some(x_start) = update.x_start {
            self.x_start = x_start;
        }
        if let Some(y_start) = update.y_start {
            self.y_start = y_start;
        }
        if let Some(width_cells) = update.width_cells {
            self.width_cells = width_cells;
        }
        if let Some(height_cells) = update.height_cells {
            self.height_cells = height_cells;
        }
        if let Some(cell_size_m) = update.cell_size_m {
            self.cell_size_m = cell_size_m;
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.x_start, self.y_start, self.width_cells, self.height_cells)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomCommand {
    pub name: String,
    pub color: String,
    pub x_start: i32,
    pub y_start: i32,
    pub width_cells: i32,
    pub height_cells: i32,
    pub cell_size_m: f32,
}

impl CreateRoomCommand {
    /// Command whose geometry is the given bounding box
    pub fn from_bounds(name: impl Into<String>, color: impl Into<String>, bounds: GridBounds) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            x_start: bounds.x_start,
            y_start: bounds.y_start,
            width_cells: bounds.width_cells,
            height_cells: bounds.height_cells,
            cell_size_m: CELL_SIZE_M,
        }
    }
}

/// Partial room update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRoomCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_cells: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cells: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size_m: Option<f32>,
}

impl UpdateRoomCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.x_start.is_none()
            && self.y_start.is_none()
            && self.width_cells.is_none()
            && self.height_cells.is_none()
            && self.cell_size_m.is_none()
    }

    /// Set the geometry fields from a bounding box
    pub fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.x_start = Some(bounds.x_start);
        self.y_start = Some(bounds.y_start);
        self.width_cells = Some(bounds.width_cells);
        self.height_cells = Some(bounds.height_cells);
        self.cell_size_m = Some(CELL_SIZE_M);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSort {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListRoomsQuery {
    pub sort: RoomSort,
    pub order: SortOrder,
}

/// Cells of one room as read from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCells {
    pub room_id: Uuid,
    pub cells: Vec<CellCoord>,
}

/// Full-replace write of a room's cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceRoomCells {
    pub cells: Vec<CellCoord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCellsSaved {
    pub room_id: Uuid,
    pub cells_saved: usize,
}

/// A stored piece of furniture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furniture {
    pub id: Uuid,
    pub room_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Furniture {
    pub fn apply_update(&mut self, update: &UpdateFurnitureCommand) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFurnitureCommand {
    pub room_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFurnitureCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl UpdateFurnitureCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.color.is_none()
    }
}

/// Where a piece of furniture sits inside its room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurniturePlacement {
    #[serde(default)]
    pub furniture_id: Option<Uuid>,
    pub room_id: Uuid,
    pub x: i32,
    pub y: i32,
    pub width_cells: i32,
    pub height_cells: i32,
}

impl FurniturePlacement {
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.x, self.y, self.width_cells, self.height_cells)
    }
}

/// Placement write, keyed by the furniture id it is sent with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementUpsert {
    pub room_id: Uuid,
    pub x: i32,
    pub y: i32,
    pub width_cells: i32,
    pub height_cells: i32,
}

impl PlacementUpsert {
    pub fn from_bounds(room_id: Uuid, bounds: GridBounds) -> Self {
        Self {
            room_id,
            x: bounds.x_start,
            y: bounds.y_start,
            width_cells: bounds.width_cells,
            height_cells: bounds.height_cells,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.x, self.y, self.width_cells, self.height_cells)
    }

    pub fn into_placement(self, furniture_id: Uuid) -> FurniturePlacement {
        FurniturePlacement {
            furniture_id: Some(furniture_id),
            room_id: self.room_id,
            x: self.x,
            y: self.y,
            width_cells: self.width_cells,
            height_cells: self.height_cells,
        }
    }
}

/// Something kept in a piece of furniture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub furniture_id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Row of an item list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSort {
    #[default]
    CreatedAt,
    Name,
}

/// Items of one piece of furniture, optionally filtered by a name fragment
/// and paged with `limit`/`offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemsQuery {
    pub furniture_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default)]
    pub sort: ItemSort,
    #[serde(default)]
    pub order: SortOrder,
}

impl ListItemsQuery {
    pub fn for_furniture(furniture_id: Uuid) -> Self {
        Self {
            furniture_id,
            q: None,
            limit: None,
            offset: None,
            sort: ItemSort::default(),
            order: SortOrder::default(),
        }
    }
}

/// Several items added to one piece of furniture in a single request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemsRequest {
    pub names: Vec<String>,
}

impl CreateItemsRequest {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreateFailure {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bulk create is not all-or-nothing: each name lands in one of the lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemsResult {
    pub created: Vec<ItemSummary>,
    pub failed: Vec<ItemCreateFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameItem {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedItem {
    pub id: Uuid,
    pub name: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    #[default]
    Relevance,
    Name,
    CreatedAt,
}

/// Find items by a name fragment matched against the item, its furniture
/// and its room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItemsQuery {
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default)]
    pub sort: SearchSort,
    /// Ascending unless `Desc`; ignored for relevance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl SearchItemsQuery {
    pub fn text(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }
}

/// Id and display name of a parent record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// One search result: the item and where it is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub item_id: Uuid,
    pub item_name: String,
    pub furniture: NamedRef,
    pub room: NamedRef,
}
