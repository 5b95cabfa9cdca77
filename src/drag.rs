//! Drag session state machine.
//!
//! ```text
//!            begin_drag (hit)              update
//!   ┌──────┐ ─────────────────► ┌──────────┐ ◄──┐
//!   │ Idle │                    │ Dragging │ ───┘
//!   └──────┘ ◄───────────────── └──────────┘
//!                 end_drag
//! ```
//!
//! A `begin_drag` while already dragging ends the running session and starts
//! a new one. Stray `update`/`end_drag` calls while idle are ignored, and no
//! transition ever returns an error to the caller.
use egui::{Pos2, Vec2};
use log::{debug, warn};

use crate::error::CanvasError;
use crate::event::DragEvent;
use crate::geometry::{ShapeId, ShapeRegistry};

/// Bookkeeping for the single active drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Shape picked by the hit-test
    pub shape: ShapeId,
    /// Pointer position at `begin_drag`
    pub origin: Pos2,
    /// Pointer position of the last handled event
    pub last: Pos2,
}

impl DragSession {
    /// Offset applied to the object since the session started
    pub fn total_offset(&self) -> Vec2 {
        self.last - self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Owns the drag session and drives the registry from pointer positions
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn active_shape(&self) -> Option<ShapeId> {
        self.session().map(|session| session.shape)
    }

    /// Last pointer position, `Pos2::ZERO` while idle
    pub fn last_pointer(&self) -> Pos2 {
        self.session().map_or(Pos2::ZERO, |session| session.last)
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            DragState::Idle => "Idle",
            DragState::Dragging(_) => "Dragging",
        }
    }

    /// Picks the shape nearest to `pos` and raises its object to the front.
    ///
    /// A hit on a label or port resolves to the handle that owns it, so the
    /// session always drives the object's handle. An empty registry leaves
    /// the controller idle.
    pub fn begin_drag(&mut self, registry: &mut ShapeRegistry, pos: Pos2) -> Option<DragEvent> {
        if self.is_dragging() {
            if let Some(ended) = self.end_drag(registry, pos) {
                debug!("begin_drag while dragging, closed previous session: {:?}", ended);
            }
        }

        let shape = match registry.hit_test(pos) {
            Ok(hit) => registry.handle_of(hit),
            Err(CanvasError::NoShape) => {
                debug!("begin_drag at {:?} found no shape", pos);
                return None;
            }
            Err(err) => {
                warn!("begin_drag at {:?} failed: {}", pos, err);
                return None;
            }
        };

        if let Err(err) = registry.raise_object(shape) {
            warn!("Could not raise {}: {}", shape, err);
        }

        self.state = DragState::Dragging(DragSession {
            shape,
            origin: pos,
            last: pos,
        });
        debug!("Dragging {} from {:?}", shape, pos);
        Some(DragEvent::Started { shape, at: pos })
    }

    /// Moves the active object by the pointer delta since the last event
    pub fn update(&mut self, registry: &mut ShapeRegistry, pos: Pos2) -> Option<DragEvent> {
        let session = *self.session()?;

        let delta = pos - session.last;
        if let Err(err) = registry.translate_object(session.shape, delta) {
            warn!("Dropping drag of {}: {}", session.shape, err);
            self.state = DragState::Idle;
            return None;
        }
        self.state = DragState::Dragging(DragSession { last: pos, ..session });
        Some(DragEvent::Moved {
            shape: session.shape,
            delta,
        })
    }

    /// Closes the session; `pos` is accepted for symmetry with the other events
    pub fn end_drag(&mut self, _registry: &mut ShapeRegistry, _pos: Pos2) -> Option<DragEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(DragEvent::Ended {
                shape: session.shape,
                total: session.total_offset(),
            }),
            DragState::Idle => None,
        }
    }
}
