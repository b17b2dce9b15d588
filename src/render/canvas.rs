//! CPU rasterizer for draw lists.

use super::text::TextRenderer;
use super::{DrawList, Primitive};
use crate::color::Rgba;

/// RGBA8 frame buffer that persists between frames (for trails)
pub struct Canvas {
    pixels: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            pixels: vec![background; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Lay `color` at `alpha` over the whole previous frame.
    ///
    /// With alpha < 1 earlier frames stay faintly visible and fade out over
    /// successive frames.
    pub fn fade_toward(&mut self, color: Rgba, alpha: f32) {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let overlay = color.with_alpha((alpha * 255.0).round() as u8);
        for px in &mut self.pixels {
            *px = blend(*px, overlay);
        }
    }

    /// Rasterize every primitive in order; text is skipped without a renderer
    pub fn draw(&mut self, list: &DrawList, text: Option<&TextRenderer>) {
        for primitive in list.primitives() {
            match primitive {
                Primitive::Rect { x, y, w, h, color } => self.fill_rect(*x, *y, *w, *h, *color),
                Primitive::RectOutline { x, y, w, h, color } => {
                    self.outline_rect(*x, *y, *w, *h, *color)
                }
                Primitive::Circle {
                    cx,
                    cy,
                    radius,
                    color,
                } => self.fill_circle(*cx, *cy, *radius, *color),
                Primitive::Polyline {
                    points,
                    width,
                    color,
                } => {
                    for pair in points.windows(2) {
                        self.thick_line(pair[0], pair[1], *width, *color);
                    }
                }
                Primitive::Text {
                    x,
                    y,
                    size,
                    text: string,
                    color,
                } => {
                    if let Some(renderer) = text {
                        renderer.draw(self, string, *x, *y, *size, *color);
                    }
                }
            }
        }
    }

    /// Alpha-blend one pixel; off-canvas coordinates are ignored
    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = blend(self.pixels[idx], color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px as i32, py as i32, color);
            }
        }
    }

    fn outline_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        if w == 0 || h == 0 {
            return;
        }
        let right = (x as i64 + w as i64 - 1).min(i32::MAX as i64) as i32;
        let bottom = (y as i64 + h as i64 - 1).min(i32::MAX as i64) as i32;

        self.fill_rect(x, y, w, 1, color);
        if bottom != y {
            self.fill_rect(x, bottom, w, 1, color);
        }
        if h > 2 {
            self.fill_rect(x, y.saturating_add(1), 1, h - 2, color);
            if right != x {
                self.fill_rect(right, y.saturating_add(1), 1, h - 2, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let rows = (cy - r).max(0)..=(cy + r).min(self.height as i64 - 1);

        for y in rows {
            let dy = y - cy;
            // Row span of the disc at this height
            let span = ((r * r - dy * dy) as f64).sqrt() as i64;
            let x0 = (cx - span).max(0);
            let x1 = (cx + span).min(self.width as i64 - 1);
            for x in x0..=x1 {
                self.blend_pixel(x as i32, y as i32, color);
            }
        }
    }

    /// Segment drawn as a run of `width`-sized squares
    fn thick_line(&mut self, from: (i32, i32), to: (i32, i32), width: u32, color: Rgba) {
        let width = width.max(1);
        let offset = (width as i32 - 1) / 2;
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).max(1);

        for step in 0..=steps {
            let x = from.0 + dx * step / steps;
            let y = from.1 + dy * step / steps;
            self.fill_rect(x - offset, y - offset, width, width, color);
        }
    }
}

/// Source-over blend of `src` onto opaque `dst`
fn blend(dst: Rgba, src: Rgba) -> Rgba {
    match src.a {
        255 => src,
        0 => dst,
        a => {
            let a = a as u32;
            let inv = 255 - a;
            let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
            Rgba::rgb(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b))
        }
    }
}
