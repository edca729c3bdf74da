//! Pure geometry helpers shared by the shapes, the label placer and the engine.

use kurbo::{Affine, BezPath, Point, Rect};
use std::f64::consts::FRAC_PI_2;

/// Half-pixel nudge so one-unit strokes land on pixel centers.
pub const ALIAS_OFFSET: f64 = 0.5;

/// Length of the arrowhead triangle, from tip to base.
pub const ARROWHEAD_LENGTH: f64 = 20.0;

/// Half of the arrowhead base width.
pub const ARROWHEAD_HALF_WIDTH: f64 = 5.0;

/// Smallest axis-aligned rectangle containing every point.
///
/// Returns `None` for an empty slice.
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let first = *points.first()?;
    let (min, max) = points.iter().skip(1).fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Some(Rect::new(min.x, min.y, max.x, max.y))
}

/// Two-corner containment test against `outer`'s closed bounds.
///
/// Only the top-left and bottom-right corners of `inner` are checked, which is
/// enough for axis-aligned rectangles with non-negative extents.
pub fn rect_contains(inner: Rect, outer: Rect) -> bool {
    let inside = |x: f64, y: f64| x >= outer.x0 && x <= outer.x1 && y >= outer.y0 && y <= outer.y1;
    inside(inner.x0, inner.y0) && inside(inner.x1, inner.y1)
}

/// Midpoint of a segment.
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Rotation that turns the canonical arrowhead (tip at the origin, base along
/// +y) so it points from `from` toward `to`.
///
/// A vertical segment is treated as the limit of the slope approached from
/// the positive x side.
pub fn arrowhead_angle(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 {
        let slope = if dy < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
        return slope + FRAC_PI_2;
    }
    let correction = if dx > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    (dy / dx).atan() + correction
}

/// Closed arrowhead triangle placed at `to`.
pub fn arrowhead(from: Point, to: Point) -> BezPath {
    let transform = Affine::translate(to.to_vec2()) * Affine::rotate(arrowhead_angle(from, to));
    let mut path = BezPath::new();
    path.move_to(Point::ZERO);
    path.line_to(Point::new(ARROWHEAD_HALF_WIDTH, ARROWHEAD_LENGTH));
    path.line_to(Point::new(-ARROWHEAD_HALF_WIDTH, ARROWHEAD_LENGTH));
    path.close_path();
    transform * path
}

/// Scale a logical rect into device pixels and grow it.
///
/// `offset` moves the origin up/left, `grow` is added to both extents.
pub fn device_region(rect: Rect, scale: f64, offset: f64, grow: f64) -> Rect {
    Rect::from_origin_size(
        (rect.x0 * scale - offset, rect.y0 * scale - offset),
        (rect.width() * scale + grow, rect.height() * scale + grow),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use proptest::prelude::*;

    fn direction(from: Point, to: Point) -> Vec2 {
        let delta = to - from;
        delta / delta.hypot()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_bounding_rect_two_corners() {
        let rect = bounding_rect(&[Point::new(50.0, 40.0), Point::new(10.0, 10.0)]).unwrap();
        assert_eq!(rect, Rect::new(10.0, 10.0, 50.0, 40.0));
        assert_close(rect.width(), 40.0);
        assert_close(rect.height(), 30.0);
    }

    #[test]
    fn test_bounding_rect_single_point() {
        let rect = bounding_rect(&[Point::new(3.0, 4.0)]).unwrap();
        assert_eq!(rect.origin(), Point::new(3.0, 4.0));
        assert_close(rect.area(), 0.0);
    }

    #[test]
    fn test_bounding_rect_empty() {
        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn test_rect_contains_closed_bounds() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect_contains(outer, outer));
        assert!(rect_contains(Rect::new(10.0, 10.0, 20.0, 20.0), outer));
        assert!(!rect_contains(Rect::new(-1.0, 10.0, 20.0, 20.0), outer));
        assert!(!rect_contains(Rect::new(90.0, 90.0, 100.5, 95.0), outer));
    }

    #[test]
    fn test_arrowhead_angle_horizontal() {
        let origin = Point::new(0.0, 0.0);
        assert_close(arrowhead_angle(origin, Point::new(10.0, 0.0)), FRAC_PI_2);
        assert_close(arrowhead_angle(origin, Point::new(-10.0, 0.0)), -FRAC_PI_2);
    }

    #[test]
    fn test_arrowhead_angle_vertical_does_not_divide_by_zero() {
        let origin = Point::new(5.0, 5.0);
        let down = arrowhead_angle(origin, Point::new(5.0, 50.0));
        let up = arrowhead_angle(origin, Point::new(5.0, -50.0));
        assert!(down.is_finite() && up.is_finite());
        assert_close(down, std::f64::consts::PI);
        assert_close(up, 0.0);
    }

    #[test]
    fn test_arrowhead_base_trails_the_tip() {
        // The base of the head must always sit between `from` and `to`.
        let cases = [
            (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
            (Point::new(0.0, 0.0), Point::new(-100.0, 30.0)),
            (Point::new(0.0, 0.0), Point::new(0.0, 100.0)),
            (Point::new(0.0, 0.0), Point::new(0.0, -100.0)),
            (Point::new(10.0, 10.0), Point::new(-40.0, -70.0)),
        ];
        for (from, to) in cases {
            let head = arrowhead(from, to);
            let bounds = kurbo::Shape::bounding_box(&head);
            let base_center = bounds.center();
            let dir = direction(from, to);
            let back = to - base_center;
            assert!(back.dot(dir) > 0.0, "head at {to:?} points the wrong way");
        }
    }

    #[test]
    fn test_device_region() {
        let rect = Rect::from_origin_size((10.0, 20.0), (30.0, 40.0));
        let region = device_region(rect, 2.0, 2.0, 10.0);
        assert_eq!(region, Rect::from_origin_size((18.0, 38.0), (70.0, 90.0)));
    }

    proptest! {
        #[test]
        fn bounding_rect_contains_every_point(
            coords in prop::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 1..64)
        ) {
            let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
            let rect = bounding_rect(&points).unwrap();
            prop_assert!(rect.width() >= 0.0);
            prop_assert!(rect.height() >= 0.0);
            for p in &points {
                prop_assert!(p.x >= rect.x0 && p.x <= rect.x1);
                prop_assert!(p.y >= rect.y0 && p.y <= rect.y1);
            }
        }
    }
}
