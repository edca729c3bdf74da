//! Freehand drawing shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::bounding_rect;
use kurbo::{BezPath, Point, Rect};
use uuid::Uuid;

/// A freehand stroke (series of points).
#[derive(Debug, Clone, PartialEq)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Points in the stroke, never empty.
    points: Vec<Point>,
    /// Stroke color.
    pub color: String,
    /// Badge label.
    pub name: Option<String>,
}

impl Freehand {
    /// Start a stroke at `point`.
    pub fn new(color: impl Into<String>, point: Point) -> Self {
        Self::from_points(color, vec![point])
    }

    /// Create from existing points. Callers guarantee at least one point.
    pub(crate) fn from_points(color: impl Into<String>, points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        Self {
            id: Uuid::new_v4(),
            points,
            color: color.into(),
            name: None,
        }
    }

    /// Points of the stroke in drawing order.
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a stroke has at least its starting point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Freehand
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
        self.points.clone()
    }

    fn bounds(&self) -> Rect {
        bounding_rect(&self.points).unwrap_or(Rect::ZERO)
    }

    fn extend_to(&mut self, point: Point) {
        self.points.push(point);
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        path
    }

    /// Freehand previews redraw the whole polyline over itself instead of
    /// patching, so there is nothing to back up.
    fn preview_region(&self, _scale: f64) -> Option<Rect> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_points() {
        let mut freehand = Freehand::new("blue", Point::new(0.0, 0.0));
        freehand.extend_to(Point::new(10.0, 10.0));
        assert_eq!(freehand.len(), 2);
        assert!(!freehand.is_empty());
    }

    #[test]
    fn test_bounds() {
        let freehand = Freehand::from_points(
            "blue",
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
        );
        assert_eq!(freehand.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_path_visits_every_point() {
        let freehand = Freehand::from_points(
            "blue",
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(9.0, 2.0)],
        );
        assert_eq!(freehand.to_path().elements().len(), 3);
        assert!(freehand.preview_region(2.0).is_none());
    }
}
