use egui::{Pos2, Rect, Vec2};

use super::Shape;

/// Average glyph advance as a fraction of the font size
pub const TEXT_WIDTH_FACTOR: f32 = 0.6;
/// Line height as a fraction of the font size
pub const TEXT_HEIGHT_FACTOR: f32 = 1.2;

/// Approximate box occupied by a single line of text centred on `anchor`
pub fn text_bounds(anchor: Pos2, text: &str, font_size: f32) -> Rect {
    let width = text.chars().count() as f32 * font_size * TEXT_WIDTH_FACTOR;
    let height = font_size * TEXT_HEIGHT_FACTOR;
    Rect::from_center_size(anchor, Vec2::new(width, height))
}

/// Distance from `pos` to the shape's bounds, zero when inside
pub fn distance_to_shape(pos: Pos2, shape: &Shape) -> f32 {
    shape.bounds().distance_to_pos(pos)
}

/// Picks the shape nearest to `pos`.
///
/// On equal distance the shape drawn on top (highest z key) wins, so a press
/// inside overlapping shapes picks the visible one.
pub fn nearest<'a>(pos: Pos2, shapes: impl IntoIterator<Item = &'a Shape>) -> Option<&'a Shape> {
    let mut best: Option<(&Shape, f32)> = None;
    for shape in shapes {
        let distance = distance_to_shape(pos, shape);
        match best {
            Some((top, best_distance))
                if distance > best_distance || (distance == best_distance && shape.z() < top.z()) => {}
            _ => best = Some((shape, distance)),
        }
    }
    best.map(|(shape, _)| shape)
}

pub fn contains(pos: Pos2, shape: &Shape) -> bool {
    shape.bounds().contains(pos)
}
