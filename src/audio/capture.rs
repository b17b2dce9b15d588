//! Per-callback processing: de-interleave, chunk, analyze, publish.

use std::sync::Arc;

use super::fft::SpectralAnalyzer;
use super::sanitize::sanitize_waveform_in_place;
use super::state::SharedSignalState;
use crate::error::AudioError;

/// Owned by the capture callback; turns arbitrary-length device buffers into
/// fixed-size chunks and publishes one snapshot per chunk.
pub struct ChunkProcessor {
    analyzer: SpectralAnalyzer,
    state: Arc<SharedSignalState>,
    pending: Vec<f32>,
    chunk_size: usize,
}

impl ChunkProcessor {
    pub fn new(state: Arc<SharedSignalState>) -> Result<Self, AudioError> {
        let chunk_size = state.config().chunk_size;
        let analyzer = SpectralAnalyzer::new(chunk_size)?;
        Ok(Self {
            analyzer,
            state,
            pending: Vec::with_capacity(chunk_size * 2),
            chunk_size,
        })
    }

    /// Feed one device buffer of interleaved frames with `channels` channels.
    ///
    /// Only the first channel is kept. A buffer that does not divide into
    /// whole frames publishes silence and drops any partial chunk.
    pub fn push_interleaved(&mut self, data: &[f32], channels: usize) {
        if channels == 0 || data.len() % channels != 0 {
            log::warn!(
                "Malformed capture buffer: {} samples for {} channels",
                data.len(),
                channels
            );
            self.pending.clear();
            self.state.publish_silence();
            return;
        }

        self.pending
            .extend(data.chunks_exact(channels).map(|frame| frame[0]));

        while self.pending.len() >= self.chunk_size {
            let chunk: Vec<f32> = self.pending.drain(..self.chunk_size).collect();
            self.process_chunk(chunk);
        }
    }

    fn process_chunk(&mut self, mut chunk: Vec<f32>) {
        sanitize_waveform_in_place(&mut chunk);
        match self.analyzer.analyze(&chunk) {
            Ok(spectrum) => self.state.publish(chunk, spectrum),
            Err(e) => {
                log::warn!("Spectral analysis failed: {}", e);
                self.state.publish_silence();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CaptureConfig;

    fn processor() -> (ChunkProcessor, Arc<SharedSignalState>) {
        let state = Arc::new(SharedSignalState::new(CaptureConfig::default()));
        (ChunkProcessor::new(Arc::clone(&state)).unwrap(), state)
    }

    #[test]
    fn test_publishes_once_per_full_chunk() {
        let (mut proc, state) = processor();

        proc.push_interleaved(&[0.1; 600], 1);
        assert_eq!(state.snapshot().sequence, 0);

        proc.push_interleaved(&[0.1; 600], 1);
        assert_eq!(state.snapshot().sequence, 1);

        // 176 left over + 2048 = two more chunks
        proc.push_interleaved(&[0.1; 2048], 1);
        assert_eq!(state.snapshot().sequence, 3);
    }

    #[test]
    fn test_keeps_first_channel_only() {
        let (mut proc, state) = processor();

        let stereo: Vec<f32> = (0..2048)
            .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        proc.push_interleaved(&stereo, 2);

        let snap = state.snapshot();
        assert_eq!(snap.sequence, 1);
        assert!(snap.waveform.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_corrupt_samples_are_sanitized_before_publish() {
        let (mut proc, state) = processor();

        let mut data = vec![0.0f32; 1024];
        data[0] = f32::NAN;
        data[1] = f32::INFINITY;
        data[2] = 4.0;
        proc.push_interleaved(&data, 1);

        let snap = state.snapshot();
        assert_eq!(&snap.waveform[..3], &[0.0, 0.0, 1.0]);
        assert!(snap.spectrum.iter().all(|m| m.is_finite() && *m >= 0.0));
    }

    #[test]
    fn test_malformed_buffer_publishes_silence_and_recovers() {
        let (mut proc, state) = processor();

        proc.push_interleaved(&[0.3; 1024], 1);
        proc.push_interleaved(&[0.3; 500], 1);

        // Odd length cannot be stereo frames
        proc.push_interleaved(&[0.3; 3], 2);
        let snap = state.snapshot();
        assert_eq!(snap.sequence, 2);
        assert!(snap.waveform.iter().all(|&s| s == 0.0));

        // Partial chunk was discarded; the stream keeps going
        proc.push_interleaved(&[0.3; 1024], 1);
        let snap = state.snapshot();
        assert_eq!(snap.sequence, 3);
        assert!(snap.waveform.iter().all(|&s| s == 0.3));
    }
}
