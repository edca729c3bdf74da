//! Rectangle shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{ALIAS_OFFSET, device_region};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use uuid::Uuid;

/// Device pixels the preview backup origin is pulled up and left.
const PREVIEW_OFFSET: f64 = 2.0;
/// Device pixels added to both extents of the preview backup.
const PREVIEW_GROW: f64 = 10.0;

/// An outlined rectangle spanned by two corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where the drag started.
    pub anchor: Point,
    /// Opposite corner, follows the pointer while drawing.
    pub corner: Point,
    /// Stroke color.
    pub color: String,
    /// Badge label.
    pub name: Option<String>,
}

impl Rectangle {
    /// Create a new rectangle from two corners.
    pub fn new(color: impl Into<String>, anchor: Point, corner: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            corner,
            color: color.into(),
            name: None,
        }
    }

    /// Normalized rect between the two corners.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.corner)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
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
        vec![self.anchor, self.corner]
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn extend_to(&mut self, point: Point) {
        self.corner = point;
    }

    fn to_path(&self) -> BezPath {
        (self.bounds() + Vec2::new(ALIAS_OFFSET, ALIAS_OFFSET)).to_path(0.1)
    }

    fn preview_region(&self, scale: f64) -> Option<Rect> {
        Some(device_region(self.bounds(), scale, PREVIEW_OFFSET, PREVIEW_GROW))
    }
}
