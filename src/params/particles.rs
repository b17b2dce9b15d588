//! Particle field physics parameters.

/// Particle population and spectrum-reactive physics
#[derive(Debug, Clone)]
pub struct ParticleParams {
    /// Fixed population size
    pub count: usize,

    /// Initial velocity components are drawn from [-max, max) (pixels/frame)
    pub max_initial_speed: f32,

    /// Initial size range (pixels)
    pub initial_size: (f32, f32),

    /// Speed multiplier gain: velocity × (1 + gain × intensity)
    pub speed_gain: f32,

    /// Size gain: size = min_size + gain × intensity
    pub size_gain: f32,

    /// Size clamp (pixels)
    pub min_size: f32,
    pub max_size: f32,

    /// Hue advance per frame at full intensity (turns)
    pub hue_rate: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 100,
            max_initial_speed: 2.0,
            initial_size: (1.0, 4.0),
            speed_gain: 2.0,
            size_gain: 8.0,
            min_size: 1.0,
            max_size: 20.0,
            hue_rate: 0.02,
        }
    }
}
