use super::{cell_at, cell_rect, GridStyle};
use crate::tools::{BrushSize, GridEditorSurface, SurfaceEvent};
use room_grid_core::{CellCoord, RoomGrid};

/// Draw the grid and translate the pointer into surface gestures.
///
/// Returns the events emitted this frame; the caller applies them to its grid.
pub fn show_grid_editor(
    ui: &mut egui::Ui,
    grid: &RoomGrid,
    surface: &mut GridEditorSurface,
    style: &GridStyle,
) -> Vec<SurfaceEvent> {
    let px = style.cell_size_px;
    let size = egui::vec2(grid.width() as f32 * px, grid.height() as f32 * px);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);

    for cell in grid.cells() {
        let color = if cell.filled {
            style.fill_color
        } else if !cell.allowed {
            style.disallowed_color
        } else {
            style.empty_color
        };
        let cell_px = cell_rect(rect.min, px, cell.coord());
        painter.rect_filled(cell_px.shrink(0.5), 0.0, color);
    }
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, style.line_color),
        egui::StrokeKind::Outside,
    );

    let mut events = Vec::new();
    let (pressed, released, hover_pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.any_released(),
            i.pointer.hover_pos(),
        )
    });
    let hovered = hover_pos
        .filter(|pos| rect.contains(*pos))
        .map(|pos| cell_at(rect.min, px, pos));

    // Last cell the stroke passed over, so each cell is entered once
    let last_id = response.id.with("last_cell");
    if pressed {
        if let Some(cell) = hovered {
            surface.pointer_down(grid, cell, |e| events.push(e));
            ui.data_mut(|d| d.insert_temp(last_id, cell));
        }
    } else if surface.is_dragging() {
        if let Some(cell) = hovered {
            let last = ui.data(|d| d.get_temp::<CellCoord>(last_id));
            if last != Some(cell) {
                surface.pointer_enter(grid, cell, |e| events.push(e));
                ui.data_mut(|d| d.insert_temp(last_id, cell));
            }
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            surface.click(grid, cell_at(rect.min, px, pos), |e| events.push(e));
        }
    }

    if released && surface.is_dragging() {
        surface.pointer_up();
        ui.data_mut(|d| d.remove::<CellCoord>(last_id));
    }

    if response.hovered() {
        if let Some(cell) = hovered {
            for target in surface.brush_cells(grid, cell) {
                painter.rect_stroke(
                    cell_rect(rect.min, px, target),
                    0.0,
                    egui::Stroke::new(1.0, style.highlight_color),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    events
}

/// Row of brush size toggles
pub fn show_brush_picker(ui: &mut egui::Ui, surface: &mut GridEditorSurface) {
    ui.horizontal(|ui| {
        ui.label("Brush:");
        for size in BrushSize::ALL {
            ui.selectable_value(&mut surface.brush, size, size.label());
        }
    });
}
