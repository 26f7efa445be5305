//! Editing sessions
//!
//! A session owns the grid and gesture state behind one editing screen and
//! turns it into store commands when the user saves.

mod placement;
mod room_editor;

pub use placement::PlacementSession;
pub use room_editor::RoomEditorSession;

/// Color offered for a new room
pub const DEFAULT_ROOM_COLOR: &str = "#aabbcc";
