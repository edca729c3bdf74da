//! Single-line text measurement and rasterization via cosmic-text.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use std::collections::HashMap;

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
}

/// Shapes and rasterizes badge text.
///
/// The font system loads system fonts on first use.
pub struct TextRenderer {
    font_system: Option<FontSystem>,
    swash_cache: SwashCache,
    widths: HashMap<MeasureKey, f32>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            font_system: None,
            swash_cache: SwashCache::new(),
            widths: HashMap::new(),
        }
    }

    /// Width of one line of `text` at `font_size`.
    pub fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
        };
        if let Some(width) = self.widths.get(&key) {
            return *width;
        }

        let font_system = self.font_system.get_or_insert_with(FontSystem::new);
        let buffer = shape_line(font_system, text, font_size);
        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0_f32, f32::max);

        self.widths.insert(key, width);
        width
    }

    /// Rasterize one line of `text` with its top-left at `(x, y)`.
    ///
    /// `put` receives each covered pixel with its coverage-weighted color.
    pub fn draw(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: f32,
        color: cosmic_text::Color,
        mut put: impl FnMut(i32, i32, cosmic_text::Color),
    ) {
        let font_system = self.font_system.get_or_insert_with(FontSystem::new);
        let buffer = shape_line(font_system, text, font_size);
        for run in buffer.layout_runs() {
            let baseline = run.line_y as i32;
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0.0, 0.0), 1.0);
                let glyph_color = glyph.color_opt.unwrap_or(color);
                self.swash_cache.with_pixels(
                    font_system,
                    physical.cache_key,
                    glyph_color,
                    |gx, gy, pixel| {
                        put(x + physical.x + gx, y + baseline + physical.y + gy, pixel);
                    },
                );
            }
        }
    }
}

fn shape_line(font_system: &mut FontSystem, text: &str, font_size: f32) -> Buffer {
    let mut buffer = Buffer::new(
        font_system,
        Metrics {
            font_size,
            line_height: font_size * 1.2,
        },
    );
    buffer.set_size(font_system, None, None);
    let attrs = Attrs::new().family(Family::SansSerif);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_width() {
        let mut text = TextRenderer::new();
        assert_eq!(text.measure("", 12.0), 0.0);
    }

    #[test]
    fn test_measure_is_cached_and_monotonic() {
        let mut text = TextRenderer::new();
        let short = text.measure("A", 12.0);
        let long = text.measure("AAAA", 12.0);
        assert!(long >= short);
        assert_eq!(text.measure("A", 12.0), short);
        assert_eq!(text.widths.len(), 2);
    }
}
