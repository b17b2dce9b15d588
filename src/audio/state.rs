//! Hand-off cell between the capture callback and the render loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::params::CaptureConfig;

/// One chunk's waveform and the spectrum derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSnapshot {
    pub waveform: Vec<f32>,
    pub spectrum: Vec<f32>,
    /// Publish counter; 0 is the startup snapshot
    pub sequence: u64,
}

impl SignalSnapshot {
    /// Zero-filled snapshot sized for `config`
    pub fn silence(config: &CaptureConfig) -> Self {
        Self {
            waveform: vec![0.0; config.chunk_size],
            spectrum: vec![0.0; config.spectrum_bins()],
            sequence: 0,
        }
    }
}

/// Most recent snapshot plus the recording flag.
///
/// The capture callback is the only writer and swaps in a whole new
/// `Arc<SignalSnapshot>`; readers clone the `Arc` and keep a consistent
/// waveform/spectrum pair for as long as they hold it.
#[derive(Debug)]
pub struct SharedSignalState {
    current: Mutex<Arc<SignalSnapshot>>,
    recording: AtomicBool,
    config: CaptureConfig,
}

impl SharedSignalState {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            current: Mutex::new(Arc::new(SignalSnapshot::silence(&config))),
            recording: AtomicBool::new(false),
            config,
        }
    }

    /// Current snapshot (cheap: clones an `Arc`)
    pub fn snapshot(&self) -> Arc<SignalSnapshot> {
        Arc::clone(&self.lock())
    }

    /// Publish a new waveform/spectrum pair as one atomic swap
    pub fn publish(&self, waveform: Vec<f32>, spectrum: Vec<f32>) {
        let mut current = self.lock();
        let sequence = current.sequence + 1;
        *current = Arc::new(SignalSnapshot {
            waveform,
            spectrum,
            sequence,
        });
    }

    /// Publish an all-zero pair (used when a callback buffer is unusable)
    pub fn publish_silence(&self) {
        self.publish(
            vec![0.0; self.config.chunk_size],
            vec![0.0; self.config.spectrum_bins()],
        );
    }

    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::Acquire)
    }

    pub(crate) fn set_recording(&self, recording: bool) {
        self.recording.store(recording, Ordering::Release);
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    // A panicking writer cannot leave a torn snapshot behind (the swap is a
    // single pointer store), so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Arc<SignalSnapshot>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_zero_filled() {
        let state = SharedSignalState::new(CaptureConfig::default());
        let snap = state.snapshot();

        assert_eq!(snap.waveform.len(), 1024);
        assert_eq!(snap.spectrum.len(), 512);
        assert_eq!(snap.sequence, 0);
        assert!(snap.waveform.iter().chain(&snap.spectrum).all(|&v| v == 0.0));
        assert!(!state.is_recording());
    }

    #[test]
    fn test_held_snapshot_survives_publish() {
        let state = SharedSignalState::new(CaptureConfig::default());
        let before = state.snapshot();

        state.publish(vec![0.5; 1024], vec![1.0; 512]);

        assert_eq!(before.sequence, 0);
        assert_eq!(before.waveform[0], 0.0);
        let after = state.snapshot();
        assert_eq!(after.sequence, 1);
        assert_eq!(after.waveform[0], 0.5);
    }

    #[test]
    fn test_publish_silence() {
        let state = SharedSignalState::new(CaptureConfig::default());
        state.publish(vec![0.5; 1024], vec![1.0; 512]);
        state.publish_silence();

        let snap = state.snapshot();
        assert_eq!(snap.sequence, 2);
        assert_eq!(snap.spectrum.len(), 512);
        assert!(snap.spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_readers_never_see_torn_pairs() {
        let state = Arc::new(SharedSignalState::new(CaptureConfig::default()));
        let writer_state = Arc::clone(&state);

        // Every published pair carries the same tag in both halves
        let writer = thread::spawn(move || {
            for n in 1..=2000u32 {
                let tag = n as f32;
                writer_state.publish(vec![tag; 1024], vec![tag; 512]);
            }
        });

        for _ in 0..2000 {
            let snap = state.snapshot();
            let tag = snap.waveform[0];
            assert!(snap.waveform.iter().all(|&v| v == tag));
            assert!(snap.spectrum.iter().all(|&v| v == tag));
            assert_eq!(snap.sequence as f32, tag);
        }

        writer.join().unwrap();
        assert_eq!(state.snapshot().sequence, 2000);
    }
}
