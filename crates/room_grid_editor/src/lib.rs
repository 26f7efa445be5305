//! room_grid_editor - Paint rooms on a cell grid and place furniture in them
//!
//! This crate provides:
//! - The grid editor surface: brush sizes and pointer gestures turned into cell events
//! - The preview surface: a room's shape with furniture overlays
//! - Editing sessions for the room editor and the furniture placement dialog
//! - The store boundary (`RoomsApi`, `FurnitureApi`, `ItemsApi`, `SearchApi`) and an
//!   in-memory store
//! - Optimistic-update facades for the rooms list, room details, room editor,
//!   furniture items and item search
//! - egui widgets and, behind the `app` feature, a Bevy host
//!
//! # Usage
//!
//! ```rust,ignore
//! use room_grid_editor::tools::{apply_events, GridEditorSurface};
//! use room_grid_core::{CellCoord, RoomGrid};
//!
//! let mut grid = RoomGrid::new(40, 40, false);
//! let mut surface = GridEditorSurface::default();
//! let mut events = Vec::new();
//! surface.pointer_down(&grid, CellCoord::new(3, 3), |e| events.push(e));
//! surface.pointer_up();
//! apply_events(&mut grid, events);
//! ```

pub mod error;
pub mod facades;
pub mod preferences;
pub mod render;
pub mod session;
pub mod store;
pub mod tools;
pub mod ui;

#[cfg(feature = "app")]
pub mod app;

pub use room_grid_core;

pub use error::{ApiError, ApiErrorCode};
pub use facades::{
    FurnitureItemsFacade, RoomDetailsFacade, RoomEditorFacade, RoomsListFacade, SearchFacade,
};
pub use preferences::EditorPreferences;
pub use render::{PreviewHighlight, PreviewLayout};
pub use session::{PlacementSession, RoomEditorSession};
pub use store::{FurnitureApi, InMemoryStore, ItemsApi, RoomsApi, SearchApi};
pub use tools::{BrushSize, GridEditorSurface, SurfaceEvent};
