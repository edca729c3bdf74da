//! Scribble Render Library
//!
//! CPU raster implementation of the Scribble [`Surface`](scribble_core::Surface)
//! on tiny-skia, with text from cosmic-text, and PNG export of saved drawings.

mod raster;
mod text;

pub use raster::{PixelPatch, RasterSurface};
pub use text::TextRenderer;

use scribble_core::{Engine, EngineConfig, EngineError};
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size {width}x{height} at scale {scale}")]
    InvalidSize { width: f64, height: f64, scale: f64 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Output settings for [`render_png`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Logical width of the drawing region.
    pub width: f64,
    /// Logical height of the drawing region.
    pub height: f64,
    /// Device pixels per logical unit.
    pub scale: f64,
    /// Background color, `None` for transparent.
    pub background: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            scale: 1.0,
            background: Some("#ffffff".to_string()),
        }
    }
}

/// Restore a JSON record array into a fresh engine and encode the result.
pub fn render_png(json: &str, options: &RenderOptions, config: EngineConfig) -> RenderResult<Vec<u8>> {
    let mut surface = RasterSurface::new(options.width, options.height, options.scale)?;
    if let Some(background) = &options.background {
        surface.set_background(scribble_core::shapes::parse_color(background));
    }
    let mut engine = Engine::with_config(surface, config);
    engine.restore_json(json)?;
    log::info!("Rendered {} shape(s)", engine.shapes().len());
    engine.surface().encode_png()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

    #[test]
    fn test_render_png() {
        let json = r##"[{"name":null,"type":3,"color":"red","points":[{"x":10,"y":10},{"x":50,"y":40}]}]"##;
        let options = RenderOptions {
            width: 100.0,
            height: 80.0,
            ..RenderOptions::default()
        };
        let png = render_png(json, &options, EngineConfig::default()).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_render_png_rejects_bad_records() {
        let options = RenderOptions::default();
        let err = render_png("[{]", &options, EngineConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Engine(EngineError::Parse(_))));
    }

    #[test]
    fn test_render_png_rejects_empty_size() {
        let options = RenderOptions {
            width: 0.0,
            ..RenderOptions::default()
        };
        assert!(matches!(
            render_png("[]", &options, EngineConfig::default()),
            Err(RenderError::InvalidSize { .. })
        ));
    }
}
