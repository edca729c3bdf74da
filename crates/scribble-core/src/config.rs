//! Engine configuration.

use crate::error::EngineResult;
use crate::shapes::ShapeKind;
use crate::store::RedoPolicy;
use serde::{Deserialize, Serialize};

/// Drawing settings owned by one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Kind of shape started by the next `begin`.
    pub shape_kind: ShapeKind,
    /// Color given to the next shape.
    pub color: String,
    /// Stroke width in logical units.
    pub line_width: f64,
    /// Font size of badge text.
    pub label_font_size: f64,
    /// Color of badge text, `None` to pick black or white against the shape color.
    pub label_text_color: Option<String>,
    /// Whether new commits drop undone shapes.
    pub redo_policy: RedoPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shape_kind: ShapeKind::Rectangle,
            color: "#000000".to_string(),
            line_width: 1.0,
            label_font_size: 12.0,
            label_text_color: None,
            redo_policy: RedoPolicy::Keep,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
