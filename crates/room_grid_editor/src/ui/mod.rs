//! egui widgets for the editor and the preview

mod grid_editor;
mod grid_preview;

pub use grid_editor::{show_brush_picker, show_grid_editor};
pub use grid_preview::show_grid_preview;

use crate::preferences::EditorPreferences;
use egui::{Color32, Pos2, Rect};
use room_grid_core::CellCoord;

/// Colors and sizes shared by the grid widgets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub cell_size_px: f32,
    pub fill_color: Color32,
    pub empty_color: Color32,
    pub disallowed_color: Color32,
    pub line_color: Color32,
    pub highlight_color: Color32,
    /// Draw furniture names on every overlay, not only emphasized ones
    pub show_labels: bool,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            cell_size_px: 16.0,
            fill_color: Color32::from_rgb(0x21, 0x21, 0x21),
            empty_color: Color32::from_rgb(245, 245, 245),
            disallowed_color: Color32::from_rgb(200, 200, 200),
            line_color: Color32::from_rgb(224, 224, 224),
            highlight_color: Color32::from_rgb(255, 193, 7),
            show_labels: false,
        }
    }
}

impl GridStyle {
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        let defaults = Self::default();
        Self {
            cell_size_px: preferences.cell_size_px.max(4.0),
            fill_color: parse_hex_color(&preferences.fill_color).unwrap_or(defaults.fill_color),
            show_labels: preferences.show_placement_labels,
            ..defaults
        }
    }

    /// Use a room color as the fill, keeping the default when it does not parse
    pub fn with_fill_hex(mut self, hex: &str) -> Self {
        if let Some(color) = parse_hex_color(hex) {
            self.fill_color = color;
        }
        self
    }
}

/// Parse `#rrggbb`
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

/// Screen rectangle of a cell
fn cell_rect(origin: Pos2, cell_px: f32, coord: CellCoord) -> Rect {
    Rect::from_min_size(
        origin + egui::vec2(coord.x as f32 * cell_px, coord.y as f32 * cell_px),
        egui::vec2(cell_px, cell_px),
    )
}

/// Cell under a screen position (may be off the board)
fn cell_at(origin: Pos2, cell_px: f32, pos: Pos2) -> CellCoord {
    let local = pos - origin;
    CellCoord::new(
        (local.x / cell_px).floor() as i32,
        (local.y / cell_px).floor() as i32,
    )
}
