use crate::config::AppConfig;
use crate::document::Document;
use crate::input::InputHandler;
use crate::renderer::Renderer;

/// Hosts the document in an eframe window
#[derive(Debug)]
pub struct DragAndDropApp {
    document: Document,
    renderer: Renderer,
    input: InputHandler,
}

impl DragAndDropApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        Self::from_config(config)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let document = Document::from_config(config);
        log::info!(
            "Canvas ready with {} gates ({} shapes)",
            document.gates().len(),
            document.registry().read().len()
        );
        Self {
            document,
            renderer: Renderer::new(config.background_color()),
            input: InputHandler::new(egui::Rect::NOTHING),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl eframe::App for DragAndDropApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;

                self.input.set_canvas_rect(rect);
                for event in self.input.process_input(ctx) {
                    self.document.handle_event(&event);
                }

                let registry = self.document.registry().read();
                self.renderer.render(&painter, rect, &registry);
            });

        if self.document.controller().is_dragging() {
            ctx.request_repaint();
        }
    }
}
