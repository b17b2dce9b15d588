//! Spectrum-driven particle field with toroidal wrapping.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::sanitize::{finite_max, normalized};
use crate::params::ParticleParams;

/// One particle (screen-space pixels, hue in turns)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub hue: f32,
}

/// Fixed population of particles that keeps moving whether or not it is drawn
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    params: ParticleParams,
}

impl ParticleField {
    /// Create `params.count` particles with random position, velocity, size and hue
    pub fn new<R: Rng>(width: u32, height: u32, params: ParticleParams, rng: &mut R) -> Self {
        let (width, height) = (width as f32, height as f32);
        // Inclusive, ordered ranges so zero speed or a single size still sample
        let speed = finite_or_zero(params.max_initial_speed).abs();
        let (a, b) = params.initial_size;
        let (a, b) = (finite_or_zero(a), finite_or_zero(b));
        let (min_size, max_size) = (a.min(b), a.max(b));

        let particles = (0..params.count)
            .map(|_| Particle {
                position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
                velocity: Vec2::new(
                    rng.gen_range(-speed..=speed),
                    rng.gen_range(-speed..=speed),
                ),
                size: rng.gen_range(min_size..=max_size),
                hue: rng.gen::<f32>(),
            })
            .collect();

        Self {
            particles,
            width,
            height,
            params,
        }
    }

    /// Deterministic construction (tests, reproducible runs)
    pub fn with_seed(width: u32, height: u32, params: ParticleParams, seed: u64) -> Self {
        Self::new(width, height, params, &mut StdRng::seed_from_u64(seed))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Adopt new screen bounds; particles outside them wrap back in
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;

        for particle in &mut self.particles {
            particle.position.x = rewrap(particle.position.x, self.width);
            particle.position.y = rewrap(particle.position.y, self.height);
        }
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Spectrum bin that drives particle `index`
    pub fn bin_for(&self, index: usize, spectrum_len: usize) -> usize {
        particle_bin(index, self.particles.len(), spectrum_len)
    }

    /// Advance every particle one frame using the current spectrum
    pub fn update(&mut self, spectrum: &[f32]) {
        let max = finite_max(spectrum);
        let total = self.particles.len();
        let p = &self.params;

        for (i, particle) in self.particles.iter_mut().enumerate() {
            let intensity = if spectrum.is_empty() {
                0.0
            } else {
                normalized(spectrum[particle_bin(i, total, spectrum.len())], max)
            };

            particle.position += particle.velocity * (1.0 + p.speed_gain * intensity);
            particle.position.x = wrap(particle.position.x, self.width);
            particle.position.y = wrap(particle.position.y, self.height);

            particle.size = (p.min_size + p.size_gain * intensity).clamp(p.min_size, p.max_size);
            particle.hue = (particle.hue + p.hue_rate * intensity).rem_euclid(1.0);
        }
    }
}

/// `floor(index / total * len)`, clamped to the last bin
pub(crate) fn particle_bin(index: usize, total: usize, len: usize) -> usize {
    if total == 0 || len == 0 {
        return 0;
    }
    (index * len / total).min(len - 1)
}

/// Exiting one edge re-enters at the opposite edge
fn wrap(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

fn rewrap(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        0.0
    } else if value > extent {
        value.rem_euclid(extent)
    } else {
        value
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
