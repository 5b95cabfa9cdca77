use egui::{Pos2, Vec2};

use crate::geometry::ShapeId;

/// Transitions published by the drag controller
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// A shape was picked and raised
    Started {
        shape: ShapeId,
        at: Pos2,
    },
    /// The active object moved by `delta`
    Moved {
        shape: ShapeId,
        delta: Vec2,
    },
    /// The session closed; `total` is the offset accumulated since `Started`
    Ended {
        shape: ShapeId,
        total: Vec2,
    },
}

impl DragEvent {
    pub fn shape(&self) -> ShapeId {
        match self {
            DragEvent::Started { shape, .. }
            | DragEvent::Moved { shape, .. }
            | DragEvent::Ended { shape, .. } => *shape,
        }
    }
}
