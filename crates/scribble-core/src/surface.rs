//! Drawing surface abstraction.
//!
//! The engine draws through [`Surface`], which also exposes the patch
//! capability used for live previews: `capture` saves a device-pixel region,
//! `apply` puts it back. [`RecordingSurface`] is a retained-mode
//! implementation that keeps a list of draw operations, so the engine can be
//! exercised without any pixels.

use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;

/// Something the engine can draw on.
///
/// Drawing coordinates are logical units; `capture` regions are in device
/// pixels (logical units times [`Surface::scale_factor`]).
pub trait Surface {
    /// Saved contents of a region, handed back to [`Surface::apply`].
    type Patch;

    /// Logical size of the drawing region.
    fn size(&self) -> Size;

    /// Device pixels per logical unit.
    fn scale_factor(&self) -> f64 {
        1.0
    }

    /// Erase everything.
    fn clear(&mut self);

    /// Stroke a path.
    fn stroke(&mut self, path: &BezPath, color: Color, width: f64);

    /// Fill a closed path.
    fn fill(&mut self, path: &BezPath, color: Color);

    /// Advance width of one line of text.
    fn measure_text(&mut self, text: &str, font_size: f64) -> f64;

    /// Draw one line of text with its top-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color);

    /// Save the contents of a device-pixel region.
    fn capture(&mut self, region: Rect) -> Self::Patch;

    /// Restore a previously captured region.
    fn apply(&mut self, patch: Self::Patch);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
    },
    Fill {
        path: BezPath,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f64,
        color: Color,
    },
}

/// Patch for a [`RecordingSurface`]: how many operations existed at capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePatch {
    /// Captured region in device pixels.
    pub region: Rect,
    mark: usize,
}

/// Retained-mode surface that records draw operations.
///
/// Applying a patch drops every operation recorded after its capture, which
/// is exactly what restoring the pixels under a preview does as long as
/// patches are applied in the order the engine uses them (one outstanding,
/// restored before the next capture).
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    scale_factor: f64,
    ops: Vec<DrawOp>,
    clears: usize,
    captures: Vec<Rect>,
    /// Advance per character as a fraction of the font size.
    char_advance: f64,
}

impl RecordingSurface {
    /// Default advance per character, relative to the font size.
    pub const DEFAULT_CHAR_ADVANCE: f64 = 0.5;

    /// Create a surface of the given logical size at scale 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            scale_factor: 1.0,
            ops: Vec::new(),
            clears: 0,
            captures: Vec::new(),
            char_advance: Self::DEFAULT_CHAR_ADVANCE,
        }
    }

    /// Set the device scale factor.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Operations currently on the surface, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// How many times the surface was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Every region captured so far, oldest first.
    pub fn captures(&self) -> &[Rect] {
        &self.captures
    }

    /// Texts currently drawn.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Patch = ScenePatch;

    fn size(&self) -> Size {
        self.size
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn stroke(&mut self, path: &BezPath, color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            color,
            width,
        });
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
        });
    }

    fn measure_text(&mut self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.char_advance
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            font_size,
            color,
        });
    }

    fn capture(&mut self, region: Rect) -> ScenePatch {
        self.captures.push(region);
        ScenePatch {
            region,
            mark: self.ops.len(),
        }
    }

    fn apply(&mut self, patch: ScenePatch) {
        self.ops.truncate(patch.mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 10.0));
        path
    }

    #[test]
    fn test_apply_drops_ops_after_capture() {
        let black = Color::from_rgba8(0, 0, 0, 255);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.stroke(&line(), black, 1.0);
        let patch = surface.capture(Rect::new(0.0, 0.0, 20.0, 20.0));
        surface.stroke(&line(), black, 1.0);
        surface.fill_text("A", Point::ZERO, 12.0, black);
        assert_eq!(surface.ops().len(), 3);
        surface.apply(patch);
        assert_eq!(surface.ops().len(), 1);
        assert_eq!(surface.captures().len(), 1);
    }

    #[test]
    fn test_measure_text() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        assert_eq!(surface.measure_text("Java", 12.0), 24.0);
        assert_eq!(surface.measure_text("", 12.0), 0.0);
    }

    #[test]
    fn test_clear() {
        let mut surface = RecordingSurface::new(100.0, 100.0).with_scale_factor(2.0);
        surface.fill(&line(), Color::from_rgba8(1, 2, 3, 255));
        surface.clear();
        assert!(surface.ops().is_empty());
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.scale_factor(), 2.0);
    }
}
