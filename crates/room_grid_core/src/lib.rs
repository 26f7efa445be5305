//! Core data structures for room_grid
//!
//! This crate provides the fundamental types for painting rooms on a cell grid:
//! - `CellCoord` - A single `(x, y)` grid address with its canonical `"x:y"` key
//! - `RoomGrid` - The editable board with connected-region painting rules
//! - `GridBounds` - Axis-aligned rectangle covering a set of cells
//! - Records - Rooms, room cells, furniture, placements, items and search hits as stored remotely
//! - Validation - Field-level checks shared by stores and editing sessions

mod bounds;
mod coord;
mod grid;
mod records;
pub mod validation;

pub use bounds::GridBounds;
pub use coord::{
    CellCoord, ParseCoordError, CELL_SIZE_M, MAX_COORD, MAX_GRID_SIDE, MAX_SPAN_CELLS,
};
pub use grid::{GridCell, RoomGrid};
pub use records::{
    CreateFurnitureCommand, CreateItemsRequest, CreateItemsResult, CreateRoomCommand, Furniture,
    FurniturePlacement, Item, ItemCreateFailure, ItemSort, ItemSummary, ListItemsQuery,
    ListRoomsQuery, NamedRef, PlacementUpsert, RenameItem, RenamedItem, ReplaceRoomCells, Room,
    RoomCells, RoomCellsSaved, RoomSort, SearchHit, SearchItemsQuery, SearchSort, SortOrder,
    UpdateFurnitureCommand, UpdateRoomCommand,
};
pub use validation::FieldErrors;
