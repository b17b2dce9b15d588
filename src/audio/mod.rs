//! Live audio capture and spectral analysis.
//!
//! The cpal callback chunks incoming samples, sanitizes them, computes a
//! magnitude spectrum, and publishes both into [`SharedSignalState`] for the
//! render loop to read.

mod capture;
mod device;
mod fft;
pub mod sanitize;
mod source;
mod state;

// Re-export public types
pub use capture::ChunkProcessor;
pub use device::CpalBackend;
pub use fft::{bin_for_frequency, SpectralAnalyzer};
pub use source::{AudioSource, CaptureBackend};
pub use state::{SharedSignalState, SignalSnapshot};

#[cfg(test)]
pub(crate) use source::testing;
