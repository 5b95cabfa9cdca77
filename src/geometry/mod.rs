//! Shapes, tags and the registry that owns them.

pub mod hit_testing;
mod registry;
mod shape;

pub use registry::{ShapeRegistry, SharedRegistry};
pub use shape::{Shape, ShapeId, ShapeKind, ShapeStyle, Tag};
