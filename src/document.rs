use egui::Pos2;
use log::warn;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::AppConfig;
use crate::drag::DragController;
use crate::error::CanvasResult;
use crate::event::{DragLogger, EventBus};
use crate::gate::{Gate, GateLayout};
use crate::geometry::{ShapeRegistry, SharedRegistry, Tag};
use crate::input::{InputBinder, PointerEvent};

/// The canvas surface: shapes, gates and the single drag controller that
/// every movable shape is bound to
#[derive(Debug)]
pub struct Document {
    registry: SharedRegistry,
    gates: Vec<Gate>,
    layout: GateLayout,
    controller: Rc<RefCell<DragController>>,
    binder: InputBinder,
    events: Rc<EventBus>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(GateLayout::default())
    }
}

impl Document {
    pub fn new(layout: GateLayout) -> Self {
        let registry = ShapeRegistry::new().shared();
        let controller = Rc::new(RefCell::new(DragController::new()));
        let events = Rc::new(EventBus::new());
        events.subscribe(Box::new(DragLogger));

        let mut binder = InputBinder::new(registry.clone());
        binder.bind_drag(Tag::Movable, controller.clone(), events.clone());

        Self {
            registry,
            gates: Vec::new(),
            layout,
            controller,
            binder,
            events,
        }
    }

    /// Builds the startup layout; gates the config describes badly are skipped
    pub fn from_config(config: &AppConfig) -> Self {
        let mut document = Self::new(config.gate.clone());
        for placement in &config.gates {
            let position = Pos2::new(placement.x, placement.y);
            if let Err(err) = document.add_gate(&placement.gate_type, position) {
                warn!("Skipping gate {:?}: {}", placement.gate_type, err);
            }
        }
        document
    }

    /// Creates a gate with the document's layout
    pub fn add_gate(&mut self, gate_type: &str, position: Pos2) -> CanvasResult<&Gate> {
        let gate = Gate::create(gate_type, position, &self.layout, &mut self.registry.write())?;
        self.gates.push(gate);
        Ok(&self.gates[self.gates.len() - 1])
    }

    /// Routes a pointer event through the tag bindings
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        self.binder.dispatch(event)
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn layout(&self) -> &GateLayout {
        &self.layout
    }

    pub fn controller(&self) -> Ref<'_, DragController> {
        self.controller.borrow()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn binder_mut(&mut self) -> &mut InputBinder {
        &mut self.binder
    }
}
