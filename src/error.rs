use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::ShapeId;

/// Errors raised by the shape registry and object construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanvasError {
    /// Hit-test ran against a registry with no shapes in it
    #[error("No shapes registered on the canvas")]
    NoShape,
    /// A draggable object was described with unusable parameters
    #[error("Invalid object spec: {0}")]
    InvalidObjectSpec(String),
    /// The id does not belong to this registry
    #[error("Unknown shape {0}")]
    UnknownShape(ShapeId),
}

/// Result type for registry and object operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur while loading the application config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config data: {0}")]
    Parse(#[from] serde_json::Error),
}
