//! tiny-skia backed raster surface.

use crate::text::TextRenderer;
use crate::{RenderError, RenderResult};
use kurbo::{BezPath, PathEl, Point, Rect, Size};
use peniko::Color;
use scribble_core::Surface;
use tiny_skia::{FillRule, IntRect, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Saved pixels of a device region.
#[derive(Debug, Clone)]
pub struct PixelPatch {
    x: usize,
    y: usize,
    /// `None` when the region lay entirely outside the pixmap.
    pixels: Option<Pixmap>,
}

/// A [`Surface`] that rasterizes into an RGBA pixmap.
pub struct RasterSurface {
    pixmap: Pixmap,
    size: Size,
    scale: f64,
    background: Option<Color>,
    text: TextRenderer,
}

impl RasterSurface {
    /// Create a transparent surface of `width` x `height` logical units.
    pub fn new(width: f64, height: f64, scale: f64) -> RenderResult<Self> {
        let invalid = || RenderError::InvalidSize { width, height, scale };
        if !(scale.is_finite() && scale > 0.0) {
            return Err(invalid());
        }
        let device_width = (width * scale).ceil();
        let device_height = (height * scale).ceil();
        let fits = |v: f64| v.is_finite() && v <= u32::MAX as f64;
        if !(fits(device_width) && fits(device_height)) {
            return Err(invalid());
        }
        let pixmap = Pixmap::new(device_width as u32, device_height as u32).ok_or_else(invalid)?;
        log::debug!("Raster surface {}x{} px", pixmap.width(), pixmap.height());
        Ok(Self {
            pixmap,
            size: Size::new(width, height),
            scale,
            background: None,
            text: TextRenderer::new(),
        })
    }

    /// Fill cleared areas with `color` instead of leaving them transparent.
    ///
    /// Repaints the whole surface.
    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
        self.clear();
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encode the current pixels as PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale as f32, self.scale as f32)
    }

    /// Clamp a device rect to whole pixels inside the pixmap.
    fn pixel_bounds(&self, region: Rect) -> Option<IntRect> {
        let x0 = region.x0.floor().max(0.0);
        let y0 = region.y0.floor().max(0.0);
        let x1 = region.x1.ceil().min(self.pixmap.width() as f64);
        let y1 = region.y1.ceil().min(self.pixmap.height() as f64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        IntRect::from_ltrb(x0 as i32, y0 as i32, x1 as i32, y1 as i32)
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: cosmic_text::Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(x as f32, y as f32, 1.0, 1.0) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn paint_for(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

impl Surface for RasterSurface {
    type Patch = PixelPatch;

    fn size(&self) -> Size {
        self.size
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }

    fn clear(&mut self) {
        let fill = match self.background {
            Some(color) => {
                let rgba = color.to_rgba8();
                tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
            }
            None => tiny_skia::Color::TRANSPARENT,
        };
        self.pixmap.fill(fill);
    }

    fn stroke(&mut self, path: &BezPath, color: Color, width: f64) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        let transform = self.transform();
        self.pixmap
            .stroke_path(&path, &paint_for(color), &stroke, transform, None);
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &paint_for(color), FillRule::Winding, transform, None);
    }

    fn measure_text(&mut self, text: &str, font_size: f64) -> f64 {
        self.text.measure(text, font_size as f32) as f64
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        let rgba = color.to_rgba8();
        let color = cosmic_text::Color::rgba(rgba.r, rgba.g, rgba.b, rgba.a);
        let x = (origin.x * self.scale).round() as i32;
        let y = (origin.y * self.scale).round() as i32;
        let font_size = (font_size * self.scale) as f32;

        // Shaping borrows the renderer while pixels go to the pixmap.
        let mut renderer = std::mem::take(&mut self.text);
        renderer.draw(text, x, y, font_size, color, |px, py, pixel| {
            self.put_pixel(px, py, pixel)
        });
        self.text = renderer;
    }

    fn capture(&mut self, region: Rect) -> PixelPatch {
        let bounds = self.pixel_bounds(region);
        let pixels = bounds.and_then(|rect| self.pixmap.clone_rect(rect));
        let (x, y) = bounds.map_or((0, 0), |rect| (rect.x() as usize, rect.y() as usize));
        log::trace!("Captured {region:?} as {bounds:?}");
        PixelPatch { x, y, pixels }
    }

    fn apply(&mut self, patch: PixelPatch) {
        let Some(pixels) = patch.pixels else {
            return;
        };
        let stride = self.pixmap.width() as usize;
        let patch_width = pixels.width() as usize;
        let target = self.pixmap.pixels_mut();
        for (row, source) in pixels.pixels().chunks_exact(patch_width).enumerate() {
            let start = (patch.y + row) * stride + patch.x;
            target[start..start + patch_width].copy_from_slice(source);
        }
    }
}
