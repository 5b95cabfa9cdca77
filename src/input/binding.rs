use egui::Pos2;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{PointerEvent, PointerPhase};
use crate::drag::DragController;
use crate::event::EventBus;
use crate::geometry::{SharedRegistry, Tag};

pub type PointerHandler = Box<dyn FnMut(Pos2)>;

/// Press / release / motion callbacks bound to one tag
pub struct DragHandlers {
    pub on_press: PointerHandler,
    pub on_release: PointerHandler,
    pub on_motion: PointerHandler,
}

impl std::fmt::Debug for DragHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragHandlers").finish_non_exhaustive()
    }
}

impl DragHandlers {
    pub fn new(
        on_press: impl FnMut(Pos2) + 'static,
        on_release: impl FnMut(Pos2) + 'static,
        on_motion: impl FnMut(Pos2) + 'static,
    ) -> Self {
        Self {
            on_press: Box::new(on_press),
            on_release: Box::new(on_release),
            on_motion: Box::new(on_motion),
        }
    }

    /// Routes the three phases into the shared drag controller.
    ///
    /// Each call takes the registry write lock for the whole transition and
    /// publishes the resulting event once the lock is released.
    pub fn for_controller(
        controller: Rc<RefCell<DragController>>,
        registry: SharedRegistry,
        events: Rc<EventBus>,
    ) -> Self {
        let press = {
            let (controller, registry, events) = (controller.clone(), registry.clone(), events.clone());
            move |pos: Pos2| {
                let event = controller.borrow_mut().begin_drag(&mut registry.write(), pos);
                if let Some(event) = event {
                    events.emit(event);
                }
            }
        };
        let release = {
            let (controller, registry, events) = (controller.clone(), registry.clone(), events.clone());
            move |pos: Pos2| {
                let event = controller.borrow_mut().end_drag(&mut registry.write(), pos);
                if let Some(event) = event {
                    events.emit(event);
                }
            }
        };
        let motion = move |pos: Pos2| {
            let event = controller.borrow_mut().update(&mut registry.write(), pos);
            if let Some(event) = event {
                events.emit(event);
            }
        };
        Self::new(press, release, motion)
    }
}

/// Maps pointer events on tagged shapes to their bound handlers.
///
/// Tags are looked up when a press arrives, so shapes registered after
/// `bind` are covered too. Motion and release follow the press that started
/// the interaction, like a toolkit's implicit pointer grab.
pub struct InputBinder {
    registry: SharedRegistry,
    bindings: HashMap<Tag, DragHandlers>,
    grab: Option<Tag>,
}

impl std::fmt::Debug for InputBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBinder")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .field("grab", &self.grab)
            .finish()
    }
}

impl InputBinder {
    pub fn new(registry: SharedRegistry) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
            grab: None,
        }
    }

    /// Binds a handler triple to `tag`, replacing any previous binding
    pub fn bind(&mut self, tag: Tag, handlers: DragHandlers) {
        debug!("Binding pointer handlers to tag '{}'", tag);
        if self.bindings.insert(tag, handlers).is_some() {
            debug!("Replaced previous binding for '{}'", tag);
        }
    }

    /// Binds `tag` to the shared drag controller
    pub fn bind_drag(&mut self, tag: Tag, controller: Rc<RefCell<DragController>>, events: Rc<EventBus>) {
        let handlers = DragHandlers::for_controller(controller, self.registry.clone(), events);
        self.bind(tag, handlers);
    }

    pub fn is_bound(&self, tag: Tag) -> bool {
        self.bindings.contains_key(&tag)
    }

    /// Tag of the topmost shape under `pos` that has a binding
    fn resolve(&self, pos: Pos2) -> Option<Tag> {
        let registry = self.registry.read();
        let tag = registry.shape_at(pos).into_iter().find_map(|id| {
            registry
                .tags_of(id)
                .ok()?
                .iter()
                .copied()
                .find(|tag| self.bindings.contains_key(tag))
        });
        tag
    }

    /// Delivers one event; returns whether a handler ran
    pub fn dispatch(&mut self, event: &PointerEvent) -> bool {
        let tag = match event.phase {
            PointerPhase::Press => {
                self.grab = self.resolve(event.position);
                self.grab
            }
            PointerPhase::Motion => self.grab,
            PointerPhase::Release => self.grab.take(),
        };

        let Some(handlers) = tag.and_then(|tag| self.bindings.get_mut(&tag)) else {
            return false;
        };
        let handler = match event.phase {
            PointerPhase::Press => &mut handlers.on_press,
            PointerPhase::Motion => &mut handlers.on_motion,
            PointerPhase::Release => &mut handlers.on_release,
        };
        handler(event.position);
        true
    }
}
