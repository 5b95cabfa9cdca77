use egui::{Align2, Color32, FontId, Painter, Rect};

use crate::geometry::{Shape, ShapeKind, ShapeRegistry};

/// Paints the registry onto an egui painter, bottom to top
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Color32::GRAY)
    }
}

impl Renderer {
    pub fn new(background: Color32) -> Self {
        Self { background }
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Renders the canvas into `rect`; shape coordinates are relative to its min corner
    pub fn render(&self, painter: &Painter, rect: Rect, registry: &ShapeRegistry) {
        painter.rect_filled(rect, 0.0, self.background);

        for id in registry.draw_order() {
            if let Ok(shape) = registry.get(id) {
                self.draw_shape(painter, rect, shape);
            }
        }
    }

    fn draw_shape(&self, painter: &Painter, canvas: Rect, shape: &Shape) {
        let offset = canvas.min.to_vec2();
        let style = shape.style();
        match shape.kind() {
            ShapeKind::Rectangle { rect } => {
                let rect = rect.translate(offset);
                painter.rect_filled(rect, 0.0, style.fill);
                if let Some(outline) = style.outline {
                    painter.rect_stroke(rect, 0.0, outline);
                }
            }
            ShapeKind::Text { anchor, text } => {
                painter.text(
                    *anchor + offset,
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(style.font_size),
                    style.fill,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{Gate, GateLayout};
    use egui::{Pos2, Vec2};

    fn painted(registry: &ShapeRegistry) -> Vec<egui::epaint::ClippedShape> {
        let renderer = Renderer::default();
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(600.0, 600.0));

        // Text layout needs the fonts a frame installs
        ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            renderer.render(&painter, rect, registry);
        })
        .shapes
    }

    #[test]
    fn test_render_paints_background_and_gate() {
        let empty = painted(&ShapeRegistry::new());
        assert!(empty.iter().any(|clipped| matches!(
            &clipped.shape,
            egui::Shape::Rect(rect) if rect.fill == Color32::GRAY
        )));

        let mut registry = ShapeRegistry::new();
        Gate::create("AND", Pos2::new(100.0, 100.0), &GateLayout::default(), &mut registry).unwrap();
        let shapes = painted(&registry);

        // body and two ports are filled and outlined, the label is one text shape
        assert_eq!(shapes.len(), empty.len() + 7);
        assert!(shapes.iter().any(|clipped| matches!(clipped.shape, egui::Shape::Text(_))));
    }
}
