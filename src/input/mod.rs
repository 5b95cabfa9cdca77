use egui::{Context, PointerButton, Pos2, Rect};

mod binding;
pub use binding::{DragHandlers, InputBinder, PointerHandler};

/// Phase of a primary-button pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button went down
    Press,
    /// Pointer moved while the button is held
    Motion,
    /// Button went up
    Release,
}

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Pos2,
}

impl PointerEvent {
    pub fn press(position: Pos2) -> Self {
        Self { phase: PointerPhase::Press, position }
    }

    pub fn motion(position: Pos2) -> Self {
        Self { phase: PointerPhase::Motion, position }
    }

    pub fn release(position: Pos2) -> Self {
        Self { phase: PointerPhase::Release, position }
    }
}

/// Handles converting raw egui input into canvas-local PointerEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if the panel moved)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Screen position to canvas position
    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate our PointerEvents.
    ///
    /// Presses outside the canvas are dropped; motion and release are kept
    /// even off-canvas so a drag that leaves the canvas still finishes.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pointer = &input.pointer;
            let pos = pointer.interact_pos().or(self.last_pointer_pos);

            if pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pos.filter(|pos| self.canvas_rect.contains(*pos)) {
                    events.push(PointerEvent::press(self.to_canvas(pos)));
                }
            }

            if let Some(pos) = pos {
                let moved = Some(pos) != self.last_pointer_pos;
                if moved && pointer.button_down(PointerButton::Primary) {
                    events.push(PointerEvent::motion(self.to_canvas(pos)));
                }
            }

            if pointer.button_released(PointerButton::Primary) {
                if let Some(pos) = pos {
                    events.push(PointerEvent::release(self.to_canvas(pos)));
                }
            }

            if pos.is_some() {
                self.last_pointer_pos = pos;
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_canvas_subtracts_origin() {
        let handler = InputHandler::new(Rect::from_min_max(Pos2::new(10.0, 20.0), Pos2::new(610.0, 620.0)));
        assert_eq!(handler.to_canvas(Pos2::new(110.0, 120.0)), Pos2::new(100.0, 100.0));
    }
}
