use common::games::snake::{Point, SnakeFrameSnapshot};
use eframe::egui;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x24, 0x2b);
const GRID_LINE: egui::Color32 = egui::Color32::from_rgb(0x2a, 0x31, 0x3a);
const HEAD: egui::Color32 = egui::Color32::from_rgb(0x8b, 0xe9, 0x5a);
const BODY: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);
const FOOD: egui::Color32 = egui::Color32::from_rgb(0xff, 0x52, 0x52);

/// Paints the board and returns the drag-sensing response used for swipes.
pub fn render_board(ui: &mut egui::Ui, snapshot: &SnakeFrameSnapshot, cell_pixels: f32) -> egui::Response {
    let side = snapshot.grid_size as f32 * cell_pixels;
    let (response, painter) = ui.allocate_painter(egui::Vec2::new(side, side), egui::Sense::drag());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 4.0, BACKGROUND);

    let stroke = egui::Stroke::new(1.0, GRID_LINE);
    for i in 1..snapshot.grid_size {
        let offset = i as f32 * cell_pixels;
        painter.line_segment(
            [origin + egui::vec2(offset, 0.0), origin + egui::vec2(offset, side)],
            stroke,
        );
        painter.line_segment(
            [origin + egui::vec2(0.0, offset), origin + egui::vec2(side, offset)],
            stroke,
        );
    }

    let food_rect = cell_rect(origin, snapshot.food, cell_pixels);
    painter.circle_filled(food_rect.center(), cell_pixels * 0.4, FOOD);

    // Drawn tail first so the head stays on top when food overlaps the body.
    for (i, segment) in snapshot.snake.iter().enumerate().rev() {
        let color = if i == 0 { HEAD } else { BODY };
        painter.rect_filled(cell_rect(origin, *segment, cell_pixels).shrink(1.0), 3.0, color);
    }

    response
}

fn cell_rect(origin: egui::Pos2, cell: Point, cell_pixels: f32) -> egui::Rect {
    let min = origin + egui::vec2(cell.x as f32 * cell_pixels, cell.y as f32 * cell_pixels);
    egui::Rect::from_min_size(min, egui::Vec2::splat(cell_pixels))
}
