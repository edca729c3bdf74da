//! Placement of name badges next to shapes.
//!
//! A badge is a padded box around one line of text. Rectangles (and freehand
//! strokes) try the four outside corners of their bounds. Arrows walk the
//! shaft by bisection, first while the probe stays below the start point,
//! then while it stays right of it, and finally fall back to the shaft
//! midpoint without checking that it fits.

use crate::geometry::{midpoint, rect_contains};
use crate::shapes::Shape;
use kurbo::{Point, Rect, Size, Vec2};

/// Space between the text and the badge border, on every side.
pub const LABEL_PADDING: f64 = 5.0;

/// Height of the single text line.
pub const LABEL_LINE_HEIGHT: f64 = 15.0;

/// Total badge height.
pub const LABEL_HEIGHT: f64 = LABEL_LINE_HEIGHT + 2.0 * LABEL_PADDING;

/// Upper bound on halvings per bisection phase.
const MAX_BISECTION_STEPS: usize = 32;

/// Badge size for text of the given measured width.
pub fn badge_size(text_width: f64) -> Size {
    Size::new(text_width + 2.0 * LABEL_PADDING, LABEL_HEIGHT)
}

/// Where the text starts inside a placed badge.
pub fn text_origin(badge: Rect) -> Point {
    badge.origin() + Vec2::new(LABEL_PADDING, LABEL_PADDING)
}

/// Find a rect for the shape's badge inside `region`.
///
/// Returns `None` when no corner candidate fits. Arrows always get a
/// placement, possibly outside `region`.
pub fn place_label(shape: &Shape, text_width: f64, region: Rect) -> Option<Rect> {
    let size = badge_size(text_width);
    match shape {
        Shape::Rectangle(_) | Shape::Freehand(_) => place_at_corners(shape.bounds(), size, region),
        Shape::Arrow(arrow) => Some(place_along_arrow(arrow.start, arrow.end, size, region)),
    }
}

/// Above-left, above-right, below-left, below-right, first that fits.
fn place_at_corners(bounds: Rect, size: Size, region: Rect) -> Option<Rect> {
    let left = bounds.x0;
    let right = bounds.x1 - size.width;
    let above = bounds.y0 - size.height;
    let below = bounds.y1;
    [(left, above), (right, above), (left, below), (right, below)]
        .into_iter()
        .map(|origin| Rect::from_origin_size(origin, size))
        .find(|candidate| rect_contains(*candidate, region))
}

fn place_along_arrow(start: Point, end: Point, size: Size, region: Rect) -> Rect {
    let below_start = |mid: Point| start.y <= mid.y;
    let right_of_start = |mid: Point| start.x <= mid.x;

    let offset = Vec2::new(LABEL_LINE_HEIGHT, -LABEL_LINE_HEIGHT);
    if let Some(rect) = bisect(start, end, size, region, offset, below_start) {
        return rect;
    }

    let offset = Vec2::new(LABEL_LINE_HEIGHT / 2.0, 0.0);
    if let Some(rect) = bisect(start, end, size, region, offset, right_of_start) {
        return rect;
    }

    // Last resort: not checked against the region.
    let mid = midpoint(start, end);
    Rect::from_origin_size(mid + Vec2::new(LABEL_LINE_HEIGHT, -LABEL_LINE_HEIGHT), size)
}

/// Walk from `end` toward `start` by halving, while `keep_going` holds for the
/// current midpoint, returning the first badge that fits.
fn bisect(
    start: Point,
    end: Point,
    size: Size,
    region: Rect,
    offset: Vec2,
    keep_going: impl Fn(Point) -> bool,
) -> Option<Rect> {
    let mut candidate = end;
    for _ in 0..MAX_BISECTION_STEPS {
        let mid = midpoint(start, candidate);
        if !keep_going(mid) {
            return None;
        }
        let rect = Rect::from_origin_size(mid + offset, size);
        if rect_contains(rect, region) {
            return Some(rect);
        }
        if mid == candidate {
            break;
        }
        candidate = mid;
    }
    None
}
