//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::error::RenderError;
use crate::params::RenderConfig;
use crate::render::{TextRenderer, VisualizationMode};

/// Largest window side accepted; matches wgpu's default 2D texture limit
pub const MAX_DIMENSION: u32 = 8192;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "vibescope")]
#[command(about = "Real-time audio-reactive visualizer", long_about = None)]
pub struct Args {
    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1200",
          value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "800",
          value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub height: u32,

    /// Initial mode: 1 bars, 2 waveform, 3 particles, 4 spiral, 5 plasma
    #[arg(long, value_name = "1-5", default_value = "1",
          value_parser = clap::value_parser!(u8).range(1..=5))]
    pub mode: u8,

    /// Target frame rate
    #[arg(long, value_name = "FPS", default_value = "60",
          value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// TrueType font for the on-screen overlay (default: bundled DejaVu Sans)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Start capturing audio immediately
    #[arg(long)]
    pub record: bool,
}

impl Args {
    /// Render configuration with window size and frame rate from the command line
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            target_fps: self.fps,
            ..RenderConfig::default()
        }
    }

    /// Overlay font: `--font` when given, otherwise the bundled one
    pub fn text_renderer(&self) -> Result<TextRenderer, RenderError> {
        match self.font.as_deref() {
            Some(path) => TextRenderer::from_file(path),
            None => TextRenderer::embedded(),
        }
    }

    pub fn initial_mode(&self) -> VisualizationMode {
        VisualizationMode::from_ordinal(self.mode).unwrap_or_default()
    }
}
