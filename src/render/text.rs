//! Overlay text rasterized with fontdue: bundled DejaVu Sans, or a TTF/OTF
//! given on the command line.

use std::path::Path;

use fontdue::{Font, FontSettings};

use super::canvas::Canvas;
use crate::color::Rgba;
use crate::error::RenderError;

const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

pub struct TextRenderer {
    font: Font,
}

impl TextRenderer {
    /// Renderer for the font compiled into the binary
    pub fn embedded() -> Result<Self, RenderError> {
        Self::from_bytes(EMBEDDED_FONT).map_err(|reason| RenderError::ParseFont {
            path: "<embedded>".to_string(),
            reason,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let data = std::fs::read(path).map_err(|source| RenderError::ReadFont {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&data).map_err(|reason| RenderError::ParseFont {
            path: path.display().to_string(),
            reason,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(str::to_string)?;
        Ok(Self { font })
    }

    /// Composite `text` with its top-left corner at (x, y)
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: i32, y: i32, size: f32, color: Rgba) {
        let mut cursor_x = x as f32;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, size);
            let glyph_x = cursor_x as i32 + metrics.xmin;
            let glyph_y = y + size as i32 - metrics.height as i32 - metrics.ymin;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (coverage as u32 * color.a as u32 / 255) as u8;
                    canvas.blend_pixel(
                        glyph_x + gx as i32,
                        glyph_y + gy as i32,
                        color.with_alpha(alpha),
                    );
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_file_is_an_error() {
        let err = TextRenderer::from_file(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(err, Err(RenderError::ReadFont { .. })));
    }

    #[test]
    fn test_embedded_font_draws_glyphs() {
        let text = TextRenderer::embedded().unwrap();
        let mut canvas = Canvas::new(200, 60, Rgba::BLACK);
        let white = Rgba::rgb(255, 255, 255);

        text.draw(&mut canvas, "Mode", 10, 10, 28.0, white);

        let lit = (0..200)
            .flat_map(|x| (0..60).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != Some(Rgba::BLACK))
            .count();
        assert!(lit > 50);
        // Nothing left of the pen position
        assert!((0..60).all(|y| canvas.pixel(5, y) == Some(Rgba::BLACK)));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(TextRenderer::from_bytes(b"not a font").is_err());
    }
}
