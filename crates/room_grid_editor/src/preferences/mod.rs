//! Editor preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use crate::tools::BrushSize;
use room_grid_core::validation::is_hex_color;
use room_grid_core::MAX_GRID_SIDE;
use serde::{Deserialize, Serialize};

/// Range the grid widgets can draw a cell at
pub const CELL_SIZE_PX_RANGE: std::ops::RangeInclusive<f32> = 4.0..=64.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "app", derive(bevy::prelude::Resource))]
#[serde(default)]
pub struct EditorPreferences {
    /// Brush selected when an editor opens
    pub brush_size: BrushSize,
    /// On-screen size of one cell
    pub cell_size_px: f32,
    /// Fill color of painted cells when the room has no color yet
    pub fill_color: String,
    /// Side of the board used for new rooms
    pub default_grid_side: i32,
    pub show_placement_labels: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            brush_size: BrushSize::Single,
            cell_size_px: 16.0,
            fill_color: "#212121".to_string(),
            default_grid_side: MAX_GRID_SIDE,
            show_placement_labels: false,
        }
    }
}

impl EditorPreferences {
    /// Grid side clamped to what the editor can show
    pub fn grid_side(&self) -> i32 {
        self.default_grid_side.clamp(1, MAX_GRID_SIDE)
    }

    /// Bring hand-edited values back into range. Each repaired field is
    /// logged and falls back to its clamp or its default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let side = self.grid_side();
        if side != self.default_grid_side {
            tracing::warn!(
                "default_grid_side {} out of range, using {}",
                self.default_grid_side,
                side
            );
            self.default_grid_side = side;
        }

        if !self.cell_size_px.is_finite() {
            tracing::warn!("cell_size_px is not a number, using {}", defaults.cell_size_px);
            self.cell_size_px = defaults.cell_size_px;
        } else if !CELL_SIZE_PX_RANGE.contains(&self.cell_size_px) {
            let clamped = self
                .cell_size_px
                .clamp(*CELL_SIZE_PX_RANGE.start(), *CELL_SIZE_PX_RANGE.end());
            tracing::warn!("cell_size_px {} out of range, using {}", self.cell_size_px, clamped);
            self.cell_size_px = clamped;
        }

        if !is_hex_color(&self.fill_color) {
            tracing::warn!("fill_color {:?} is not #rrggbb, using default", self.fill_color);
            self.fill_color = defaults.fill_color;
        }
        self
    }
}
