//! Windowless magnitude spectrum of one sample chunk.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::sanitize::sanitize_spectrum_in_place;
use crate::error::AudioError;

/// Forward FFT planned once and reused for every chunk.
///
/// No window is applied, so a tone that falls between bins leaks into its
/// neighbours.
pub struct SpectralAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    size: usize,
}

impl SpectralAnalyzer {
    /// Plan an analyzer for chunks of `size` samples (power of 2)
    pub fn new(size: usize) -> Result<Self, AudioError> {
        if !size.is_power_of_two() || size < 2 {
            return Err(AudioError::InvalidConfig(format!(
                "FFT size must be power of 2, got {}",
                size
            )));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Ok(Self {
            fft,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
            size,
        })
    }

    /// Chunk length this analyzer accepts
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of magnitudes produced per chunk
    pub fn bins(&self) -> usize {
        self.size / 2
    }

    /// Compute `|X[k]|` for `k in 0..size/2`
    pub fn analyze(&mut self, chunk: &[f32]) -> Result<Vec<f32>, AudioError> {
        if chunk.len() != self.size {
            return Err(AudioError::ChunkLength {
                expected: self.size,
                actual: chunk.len(),
            });
        }

        for (slot, &sample) in self.buffer.iter_mut().zip(chunk) {
            *slot = Complex::new(sample, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let mut magnitudes: Vec<f32> = self.buffer[..self.bins()]
            .iter()
            .map(|c| c.norm())
            .collect();
        sanitize_spectrum_in_place(&mut magnitudes);
        Ok(magnitudes)
    }
}

/// Nearest spectrum bin for a frequency, clamped to the last bin
pub fn bin_for_frequency(hz: f32, sample_rate_hz: u32, fft_size: usize) -> usize {
    let last = (fft_size / 2).saturating_sub(1);
    let bin = (hz * fft_size as f32 / sample_rate_hz as f32).round();
    if bin.is_finite() && bin > 0.0 {
        (bin as usize).min(last)
    } else {
        0
    }
}
