//! Arrow shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{ALIAS_OFFSET, arrowhead, device_region};
use kurbo::{BezPath, Point, Rect, Vec2};
use uuid::Uuid;

/// Margin around the shaft kept in the preview backup, on every side.
const PREVIEW_MARGIN: f64 = 50.0;

/// A straight arrow with a filled triangular head at `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Stroke and head color.
    pub color: String,
    /// Badge label.
    pub name: Option<String>,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(color: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: color.into(),
            name: None,
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

impl ShapeTrait for Arrow {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Arrow
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    fn points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn extend_to(&mut self, point: Point) {
        self.end = point;
    }

    fn to_path(&self) -> BezPath {
        let nudge = Vec2::new(ALIAS_OFFSET, ALIAS_OFFSET);
        let mut path = BezPath::new();
        path.move_to(self.start + nudge);
        path.line_to(self.end + nudge);
        path
    }

    fn fill_path(&self) -> Option<BezPath> {
        Some(arrowhead(self.start, self.end))
    }

    fn preview_region(&self, scale: f64) -> Option<Rect> {
        Some(device_region(
            self.bounds(),
            scale,
            PREVIEW_MARGIN,
            PREVIEW_MARGIN * 2.0,
        ))
    }
}
