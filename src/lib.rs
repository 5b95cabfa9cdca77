#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod drag;
pub mod error;
pub mod event;
pub mod gate;
pub mod geometry;
pub mod input;
pub mod renderer;

pub use app::DragAndDropApp;
pub use config::AppConfig;
pub use document::Document;
pub use drag::{DragController, DragSession, DragState};
pub use error::{CanvasError, ConfigError};
pub use event::{DragEvent, EventBus};
pub use gate::{Gate, GateLayout};
pub use geometry::{ShapeId, ShapeRegistry, SharedRegistry, Tag};
pub use input::{DragHandlers, InputBinder, PointerEvent};
pub use renderer::Renderer;
