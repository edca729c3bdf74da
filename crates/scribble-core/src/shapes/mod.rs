//! Shape definitions for the drawing surface.

mod arrow;
mod freehand;
mod rectangle;

pub use arrow::Arrow;
pub use freehand::Freehand;
pub use rectangle::Rectangle;

use crate::error::{EngineError, EngineResult};
use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The kinds of shape the engine can draw.
///
/// Serialized as the integer tag used by the record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ShapeKind {
    Freehand = 1,
    Arrow = 2,
    #[default]
    Rectangle = 3,
}

impl ShapeKind {
    /// Integer tag used by the record format.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ShapeKind {
    type Error = EngineError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(ShapeKind::Freehand),
            2 => Ok(ShapeKind::Arrow),
            3 => Ok(ShapeKind::Rectangle),
            other => Err(EngineError::UnknownShapeKind(other)),
        }
    }
}

impl From<ShapeKind> for u8 {
    fn from(kind: ShapeKind) -> Self {
        kind.tag()
    }
}

/// Parse a CSS color string, falling back to black.
pub fn parse_color(value: &str) -> Color {
    match peniko::color::parse_color(value) {
        Ok(color) => color.to_alpha_color(),
        Err(err) => {
            log::warn!("Unparseable color {value:?} ({err:?}), drawing in black");
            Color::from_rgba8(0, 0, 0, 255)
        }
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text_color(background: Color) -> Color {
    let [r, g, b, _] = background.components;
    let luminance = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    if luminance > 0.5 {
        Color::from_rgba8(0, 0, 0, 255)
    } else {
        Color::from_rgba8(255, 255, 255, 255)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// The kind tag of this shape.
    fn kind(&self) -> ShapeKind;

    /// Stroke color as given by the user.
    fn color(&self) -> &str;

    /// Label shown in the badge, if any.
    fn name(&self) -> Option<&str>;

    /// Set the label shown in the badge.
    fn set_name(&mut self, name: Option<String>);

    /// Defining points in record order.
    fn points(&self) -> Vec<Point>;

    /// Bounding box of the defining points.
    fn bounds(&self) -> Rect;

    /// Move the live endpoint (or extend the stroke) to `point`.
    fn extend_to(&mut self, point: Point);

    /// Path to stroke when drawing this shape.
    fn to_path(&self) -> BezPath;

    /// Path to fill on top of the stroke, if the shape has one.
    fn fill_path(&self) -> Option<BezPath> {
        None
    }

    /// Device-pixel region a live preview of this shape may touch.
    ///
    /// `None` means the preview is drawn without a backup.
    fn preview_region(&self, scale: f64) -> Option<Rect>;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Freehand(Freehand),
    Arrow(Arrow),
    Rectangle(Rectangle),
}

impl Shape {
    /// Start a new shape of `kind` at `point`.
    ///
    /// Two-point shapes begin with the anchor duplicated.
    pub fn begin(kind: ShapeKind, color: impl Into<String>, point: Point) -> Self {
        let color = color.into();
        match kind {
            ShapeKind::Freehand => Shape::Freehand(Freehand::new(color, point)),
            ShapeKind::Arrow => Shape::Arrow(Arrow::new(color, point, point)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(color, point, point)),
        }
    }

    /// Build a shape from its record parts, checking the point count.
    pub fn from_parts(
        kind: ShapeKind,
        color: String,
        points: Vec<Point>,
        name: Option<String>,
    ) -> EngineResult<Self> {
        let actual = points.len();
        let invalid = || EngineError::InvalidPointCount { kind, actual };
        let mut shape = match kind {
            ShapeKind::Freehand => {
                if points.is_empty() {
                    return Err(invalid());
                }
                Shape::Freehand(Freehand::from_points(color, points))
            }
            ShapeKind::Arrow => match points.as_slice() {
                [start, end] => Shape::Arrow(Arrow::new(color, *start, *end)),
                _ => return Err(invalid()),
            },
            ShapeKind::Rectangle => match points.as_slice() {
                [anchor, corner] => Shape::Rectangle(Rectangle::new(color, *anchor, *corner)),
                _ => return Err(invalid()),
            },
        };
        shape.set_name(name);
        Ok(shape)
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Freehand(s) => s.id(),
            Shape::Arrow(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Freehand(s) => s.kind(),
            Shape::Arrow(s) => s.kind(),
            Shape::Rectangle(s) => s.kind(),
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Shape::Freehand(s) => s.color(),
            Shape::Arrow(s) => s.color(),
            Shape::Rectangle(s) => s.color(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Shape::Freehand(s) => s.name(),
            Shape::Arrow(s) => s.name(),
            Shape::Rectangle(s) => s.name(),
        }
    }

    pub fn set_name(&mut self, name: Option<String>) {
        match self {
            Shape::Freehand(s) => s.set_name(name),
            Shape::Arrow(s) => s.set_name(name),
            Shape::Rectangle(s) => s.set_name(name),
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Freehand(s) => s.points(),
            Shape::Arrow(s) => s.points(),
            Shape::Rectangle(s) => s.points(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
        }
    }

    pub fn extend_to(&mut self, point: Point) {
        match self {
            Shape::Freehand(s) => s.extend_to(point),
            Shape::Arrow(s) => s.extend_to(point),
            Shape::Rectangle(s) => s.extend_to(point),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Freehand(s) => s.to_path(),
            Shape::Arrow(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
        }
    }

    pub fn fill_path(&self) -> Option<BezPath> {
        match self {
            Shape::Freehand(s) => s.fill_path(),
            Shape::Arrow(s) => s.fill_path(),
            Shape::Rectangle(s) => s.fill_path(),
        }
    }

    pub fn preview_region(&self, scale: f64) -> Option<Rect> {
        match self {
            Shape::Freehand(s) => s.preview_region(scale),
            Shape::Arrow(s) => s.preview_region(scale),
            Shape::Rectangle(s) => s.preview_region(scale),
        }
    }

    /// The stroke color parsed for drawing.
    pub fn paint(&self) -> Color {
        parse_color(self.color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_duplicates_anchor_for_two_point_shapes() {
        let p = Point::new(10.0, 10.0);
        assert_eq!(Shape::begin(ShapeKind::Rectangle, "red", p).points(), vec![p, p]);
        assert_eq!(Shape::begin(ShapeKind::Arrow, "red", p).points(), vec![p, p]);
        assert_eq!(Shape::begin(ShapeKind::Freehand, "red", p).points(), vec![p]);
    }

    #[test]
    fn test_extend_to_replaces_or_appends() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(5.0, 5.0);
        let p2 = Point::new(9.0, 1.0);

        let mut rect = Shape::begin(ShapeKind::Rectangle, "red", p0);
        rect.extend_to(p1);
        rect.extend_to(p2);
        assert_eq!(rect.points(), vec![p0, p2]);

        let mut stroke = Shape::begin(ShapeKind::Freehand, "red", p0);
        stroke.extend_to(p1);
        stroke.extend_to(p2);
        assert_eq!(stroke.points(), vec![p0, p1, p2]);
    }

    #[test]
    fn test_from_parts_checks_point_count() {
        let pts = vec![Point::new(0.0, 0.0)];
        let err = Shape::from_parts(ShapeKind::Arrow, "red".into(), pts.clone(), None).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidPointCount { kind: ShapeKind::Arrow, actual: 1 }
        ));
        assert!(Shape::from_parts(ShapeKind::Freehand, "red".into(), pts, None).is_ok());
        assert!(Shape::from_parts(ShapeKind::Freehand, "red".into(), Vec::new(), None).is_err());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ShapeKind::Freehand.tag(), 1);
        assert_eq!(ShapeKind::Arrow.tag(), 2);
        assert_eq!(ShapeKind::Rectangle.tag(), 3);
        assert!(matches!(ShapeKind::try_from(4), Err(EngineError::UnknownShapeKind(4))));
    }

    #[test]
    fn test_contrasting_text_color() {
        let white = Color::from_rgba8(255, 255, 255, 255);
        let black = Color::from_rgba8(0, 0, 0, 255);
        assert_eq!(contrasting_text_color(parse_color("#000000")), white);
        assert_eq!(contrasting_text_color(parse_color("blue")), white);
        assert_eq!(contrasting_text_color(parse_color("yellow")), black);
        assert_eq!(contrasting_text_color(parse_color("white")), black);
    }

    #[test]
    fn test_parse_color() {
        let red = parse_color("red").to_rgba8();
        assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));
        let hex = parse_color("#00ff00").to_rgba8();
        assert_eq!((hex.r, hex.g, hex.b), (0, 255, 0));
        let fallback = parse_color("not a color").to_rgba8();
        assert_eq!((fallback.r, fallback.g, fallback.b, fallback.a), (0, 0, 0, 255));
    }
}
