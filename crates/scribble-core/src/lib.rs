//! Scribble Core Library
//!
//! Platform-agnostic drawing engine: shapes, undo/redo history, label
//! placement and incremental rendering over any [`Surface`].

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod label;
pub mod record;
pub mod shapes;
pub mod store;
pub mod surface;

pub use config::EngineConfig;
pub use engine::{Engine, EngineState, ShapeCompletedHandler};
pub use error::{EngineError, EngineResult};
pub use record::{PointRecord, ShapeRecord};
pub use shapes::{Arrow, Freehand, Rectangle, Shape, ShapeId, ShapeKind, ShapeTrait};
pub use store::{RedoPolicy, ShapeStore};
pub use surface::{DrawOp, RecordingSurface, ScenePatch, Surface};
