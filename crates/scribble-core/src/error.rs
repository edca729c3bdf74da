//! Engine errors.

use crate::shapes::{ShapeId, ShapeKind};
use thiserror::Error;

/// Errors reported by the drawing engine and the record codec.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse shape records: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown shape type tag: {0}")]
    UnknownShapeKind(u8),
    #[error("{kind:?} shape cannot be built from {actual} point(s)")]
    InvalidPointCount { kind: ShapeKind, actual: usize },
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
