//! Audio capture configuration and constants.

use crate::error::AudioError;

/// Capture constants (compile-time, match the analyzer setup)
pub mod audio_constants {
    /// Samples per analysis chunk
    /// 1024 @ 44.1kHz ≈ 23.2ms per chunk
    pub const CHUNK_SIZE: usize = 1024;

    /// Number of spectrum bins produced per chunk
    pub const SPECTRUM_BINS: usize = CHUNK_SIZE / 2;

    /// Requested device sample rate (Hz)
    pub const SAMPLE_RATE_HZ: u32 = 44_100;
}

/// Input stream configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Requested sample rate (Hz); the nearest supported device rate is used
    pub sample_rate_hz: u32,

    /// Requested channel count (only the first channel is analyzed)
    pub channels: u16,

    /// Samples per analysis chunk (must be power of 2)
    pub chunk_size: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: audio_constants::SAMPLE_RATE_HZ,
            channels: 1,
            chunk_size: audio_constants::CHUNK_SIZE,
        }
    }
}

impl CaptureConfig {
    /// Number of spectrum bins per chunk
    pub fn spectrum_bins(&self) -> usize {
        self.chunk_size / 2
    }

    /// Width of one spectrum bin (Hz)
    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / self.chunk_size as f32
    }

    /// Duration of one chunk (milliseconds)
    pub fn chunk_period_ms(&self) -> f32 {
        self.chunk_size as f32 * 1000.0 / self.sample_rate_hz as f32
    }

    /// Validate configuration (chunk size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), AudioError> {
        if !self.chunk_size.is_power_of_two() || self.chunk_size < 2 {
            return Err(AudioError::InvalidConfig(format!(
                "chunk size must be a power of 2, got {}",
                self.chunk_size
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(AudioError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(AudioError::InvalidConfig(
                "channel count must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capture_config() {
        let config = CaptureConfig::default();

        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.spectrum_bins(), 512);
        assert!(config.validate().is_ok());

        // 44100 / 1024 ≈ 43.07 Hz per bin, ≈ 23.2ms per chunk
        assert!((config.bin_width_hz() - 43.066).abs() < 0.01);
        assert!((config.chunk_period_ms() - 23.22).abs() < 0.01);
    }

    #[test]
    fn test_validate_rejects_bad_chunk() {
        let config = CaptureConfig {
            chunk_size: 1000,
            ..CaptureConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CaptureConfig {
            sample_rate_hz: 0,
            ..CaptureConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
