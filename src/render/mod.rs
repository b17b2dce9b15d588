//! Spectrum/waveform → draw primitives, rasterization, and presentation.
//!
//! Each frame the active [`VisualizationMode`] fills a [`DrawList`]; the
//! [`Canvas`] rasterizes it on the CPU and [`RenderSystem`] puts the pixels
//! on screen.

mod canvas;
pub mod modes;
mod overlay;
mod system;
mod text;

pub use canvas::Canvas;
pub use modes::VisualizationMode;
pub use overlay::{draw_overlay, status_line};
pub use system::RenderSystem;
pub use text::TextRenderer;

use crate::color::Rgba;
use crate::params::Palette;

/// Per-frame inputs shared by every mode
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub width: u32,
    pub height: u32,
    /// Frames rendered so far
    pub time: u64,
    pub palette: Palette,
}

impl FrameContext {
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    /// Frame counter as a phase base; `f64` keeps `time × rate` exact for
    /// any realistic session length
    pub fn time_f64(&self) -> f64 {
        self.time as f64
    }
}

/// One drawing command in canvas pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled rectangle
    Rect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgba,
    },
    /// 1px rectangle outline
    RectOutline {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgba,
    },
    /// Filled disc
    Circle {
        cx: i32,
        cy: i32,
        radius: u32,
        color: Rgba,
    },
    /// Connected line segments
    Polyline {
        points: Vec<(i32, i32)>,
        width: u32,
        color: Rgba,
    },
    /// Overlay text, top-left anchored
    Text {
        x: i32,
        y: i32,
        size: f32,
        text: String,
        color: Rgba,
    },
}

/// Ordered draw commands for one frame; later commands paint over earlier ones
#[derive(Debug, Default)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the list, keeping its allocation for the next frame
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        self.push(Primitive::Rect { x, y, w, h, color });
    }

    pub fn rect_outline(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        self.push(Primitive::RectOutline { x, y, w, h, color });
    }

    pub fn circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        self.push(Primitive::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    /// Skipped when fewer than two points are given
    pub fn polyline(&mut self, points: Vec<(i32, i32)>, width: u32, color: Rgba) {
        if points.len() < 2 {
            return;
        }
        self.push(Primitive::Polyline {
            points,
            width,
            color,
        });
    }

    pub fn text(&mut self, x: i32, y: i32, size: f32, text: impl Into<String>, color: Rgba) {
        self.push(Primitive::Text {
            x,
            y,
            size,
            text: text.into(),
            color,
        });
    }
}

impl Extend<Primitive> for DrawList {
    fn extend<I: IntoIterator<Item = Primitive>>(&mut self, iter: I) {
        self.primitives.extend(iter);
    }
}
