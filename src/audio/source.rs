//! Input stream lifecycle: start, stop, toggle.

use std::sync::Arc;

use super::capture::ChunkProcessor;
use super::state::SharedSignalState;
use crate::error::AudioError;
use crate::params::CaptureConfig;

/// Something that can open a live input stream feeding a [`ChunkProcessor`].
///
/// Dropping the returned stream must release the device and must not return
/// while a callback is still running.
pub trait CaptureBackend {
    type Stream;

    fn open(
        &self,
        config: &CaptureConfig,
        processor: ChunkProcessor,
    ) -> Result<Self::Stream, AudioError>;
}

/// Owns the input stream and the shared state its callback publishes into
pub struct AudioSource<B: CaptureBackend> {
    backend: B,
    state: Arc<SharedSignalState>,
    stream: Option<B::Stream>,
}

impl<B: CaptureBackend> AudioSource<B> {
    /// Create an idle source with zero-filled shared state
    pub fn new(backend: B, config: CaptureConfig) -> Result<Self, AudioError> {
        config.validate()?;
        Ok(Self {
            backend,
            state: Arc::new(SharedSignalState::new(config)),
            stream: None,
        })
    }

    /// Open the input stream. No-op when already recording.
    ///
    /// On failure the source stays idle and the shared state keeps its last
    /// snapshot.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let processor = ChunkProcessor::new(Arc::clone(&self.state))?;
        match self.backend.open(self.state.config(), processor) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state.set_recording(true);
                log::info!("Audio stream started");
                Ok(())
            }
            Err(e) => {
                log::error!("Error starting audio: {}", e);
                Err(e)
            }
        }
    }

    /// Close the input stream; safe to call when not recording
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Blocks until any in-flight callback returns
            drop(stream);
            log::info!("Audio stream stopped");
        }
        self.state.set_recording(false);
    }

    /// Start when idle, stop when recording. Returns the new recording state.
    pub fn toggle(&mut self) -> Result<bool, AudioError> {
        if self.is_recording() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.is_recording())
    }

    pub fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    pub fn state(&self) -> &Arc<SharedSignalState> {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CaptureBackend> Drop for AudioSource<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
