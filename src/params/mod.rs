//! Parameter definitions with units and documented semantics.
//!
//! All tunable numbers are collected here with:
//! - Units (Hz, samples, pixels, frames)
//! - Documented ranges and meanings
//! - Defaults matching the stock visualizer

mod audio;
mod particles;
mod render;

// Re-export all types
pub use audio::{audio_constants, CaptureConfig};
pub use particles::ParticleParams;
pub use render::{Palette, RenderConfig};
