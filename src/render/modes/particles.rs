//! Particle field drawn as discs colored by hue and current loudness.

use crate::audio::sanitize::{finite_max, normalized, sanitize_spectrum};
use crate::color::hsv_to_rgb;
use crate::particles::ParticleField;
use crate::render::{DrawList, FrameContext};

pub fn render(ctx: &FrameContext, spectrum: &[f32], field: &ParticleField, out: &mut DrawList) {
    let spectrum = sanitize_spectrum(spectrum);
    let max = finite_max(&spectrum);
    let (width, height) = (ctx.width_f(), ctx.height_f());

    for (i, particle) in field.particles().iter().enumerate() {
        let intensity = if spectrum.is_empty() {
            0.0
        } else {
            normalized(spectrum[field.bin_for(i, spectrum.len())], max)
        };
        let brightness = (0.5 + intensity * 0.5).clamp(0.0, 1.0);
        let color = hsv_to_rgb(particle.hue, 1.0, brightness);

        let x = particle.position.x.clamp(0.0, width) as i32;
        let y = particle.position.y.clamp(0.0, height) as i32;
        let radius = particle.size as u32;

        if radius > 0 {
            out.circle(x, y, radius, color);
        }
    }
}
