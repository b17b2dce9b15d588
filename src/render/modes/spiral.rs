//! Every fourth bin plotted along a rotating four-turn spiral.

use std::f64::consts::PI;

use crate::audio::sanitize::{finite_max, normalized, sanitize_spectrum};
use crate::color::hsv_to_rgb;
use crate::render::{DrawList, FrameContext};

const BIN_STRIDE: usize = 4;

/// Total sweep of the spiral across the spectrum (radians)
const SWEEP: f64 = 8.0 * PI;

/// Rotation per frame (radians)
const SPIN_RATE: f64 = 0.05;

/// Hue drift per frame (turns)
const HUE_RATE: f64 = 0.01;

const BASE_RADIUS: f32 = 50.0;
const INTENSITY_RADIUS: f32 = 150.0;
const BIN_RADIUS: f32 = 0.3;

pub fn render(ctx: &FrameContext, spectrum: &[f32], out: &mut DrawList) {
    let spectrum = sanitize_spectrum(spectrum);
    if spectrum.is_empty() {
        return;
    }

    let (width, height) = (ctx.width_f(), ctx.height_f());
    let center_x = (ctx.width / 2) as f32;
    let center_y = (ctx.height / 2) as f32;
    let diagonal = width.hypot(height);
    let max = finite_max(&spectrum);
    let len = spectrum.len() as f64;
    let t = ctx.time_f64();
    let spin = (t * SPIN_RATE).rem_euclid(2.0 * PI);
    let hue_shift = (t * HUE_RATE).rem_euclid(1.0);

    for (i, &magnitude) in spectrum.iter().enumerate().step_by(BIN_STRIDE) {
        let position = i as f64 / len;
        let angle = (position * SWEEP + spin) as f32;
        let intensity = normalized(magnitude, max);
        let radius = (BASE_RADIUS + intensity * INTENSITY_RADIUS + i as f32 * BIN_RADIUS)
            .clamp(0.0, diagonal);

        let x = (center_x + angle.cos() * radius).clamp(0.0, width);
        let y = (center_y + angle.sin() * radius).clamp(0.0, height);

        let hue = (position + hue_shift).rem_euclid(1.0) as f32;
        let brightness = (0.5 + intensity * 0.5).clamp(0.0, 1.0);
        let size = ((2.0 + intensity * 6.0) as u32).max(1);

        out.circle(x as i32, y as i32, size, hsv_to_rgb(hue, 1.0, brightness));
    }
}
