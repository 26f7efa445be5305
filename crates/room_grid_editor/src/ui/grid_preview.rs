use super::{cell_at, cell_rect, parse_hex_color, GridStyle};
use crate::facades::PlacementView;
use crate::render::{OverlayEmphasis, PreviewHighlight, PreviewLayout};
use room_grid_core::CellCoord;
use uuid::Uuid;

/// Paint a room's cells with its furniture overlaid. Updates `highlight.hovered`
/// from the pointer and returns the placement that was clicked, if any.
pub fn show_grid_preview(
    ui: &mut egui::Ui,
    layout: &PreviewLayout,
    cells: &[CellCoord],
    placements: &[PlacementView],
    highlight: &mut PreviewHighlight,
    style: &GridStyle,
) -> Option<Uuid> {
    let px = style.cell_size_px;
    let size = egui::vec2(layout.width as f32 * px, layout.height as f32 * px);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 0.0, style.empty_color);
    for cell in layout.render_cells(cells) {
        painter.rect_filled(
            cell_rect(rect.min, px, cell).shrink(0.5),
            0.0,
            style.fill_color,
        );
    }

    for placement in placements {
        let bounds = layout.placement_rect(placement);
        let overlay = egui::Rect::from_min_size(
            cell_rect(rect.min, px, CellCoord::new(bounds.x_start, bounds.y_start)).min,
            egui::vec2(bounds.width_cells as f32 * px, bounds.height_cells as f32 * px),
        );
        let color = parse_hex_color(&placement.color).unwrap_or(style.highlight_color);
        let (alpha, stroke_width) = match highlight.emphasis(placement.furniture_id) {
            OverlayEmphasis::Highlighted => (0.9, 3.0),
            OverlayEmphasis::Hovered => (0.75, 2.0),
            OverlayEmphasis::Normal => (0.55, 1.0),
        };
        painter.rect_filled(overlay, 2.0, color.gamma_multiply(alpha));
        painter.rect_stroke(
            overlay,
            2.0,
            egui::Stroke::new(stroke_width, color),
            egui::StrokeKind::Inside,
        );
        if style.show_labels || highlight.is_emphasized(placement.furniture_id) {
            painter.text(
                overlay.left_top() + egui::vec2(2.0, 1.0),
                egui::Align2::LEFT_TOP,
                &placement.name,
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }

    let hovered = response
        .hover_pos()
        .and_then(|pos| layout.placement_at(placements, cell_at(rect.min, px, pos)));
    highlight.set_hovered(hovered);

    if response.clicked() {
        return response
            .interact_pointer_pos()
            .and_then(|pos| layout.placement_at(placements, cell_at(rect.min, px, pos)));
    }
    None
}
