//! Rendering and presentation configuration.

use crate::color::Rgba;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas and window width (pixels)
    pub window_width: u32,

    /// Canvas and window height (pixels)
    pub window_height: u32,

    /// Target frame rate (frames per second)
    pub target_fps: u32,

    /// Alpha of the background laid over the previous frame (0 = endless
    /// trails, 1 = no trails)
    pub trail_fade: f32,

    /// Overlay font size for headings (pixels)
    pub title_font_px: f32,

    /// Overlay font size for status and controls (pixels)
    pub body_font_px: f32,

    /// Color scheme
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1200,
            window_height: 800,
            target_fps: 60,
            trail_fade: 0.2,
            title_font_px: 28.0,
            body_font_px: 18.0,
            palette: Palette::default(),
        }
    }
}

/// Fixed colors used by the waveform and the overlay
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Rgba,

    /// Waveform line and overlay headings
    pub primary: Rgba,

    /// Mirrored waveform (primary with blue channel cut to a third)
    pub primary_dim: Rgba,

    pub text: Rgba,
    pub text_muted: Rgba,
    pub status_on: Rgba,
    pub status_off: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            primary: Rgba::rgb(0, 255, 136),
            primary_dim: Rgba::rgb(0, 255, 136 / 3),
            text: Rgba::rgb(255, 255, 255),
            text_muted: Rgba::rgb(200, 200, 200),
            status_on: Rgba::rgb(0, 255, 0),
            status_off: Rgba::rgb(255, 100, 100),
        }
    }
}
