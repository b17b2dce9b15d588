//! Error types for capture and presentation.

use thiserror::Error;

/// Failures opening, running, or feeding the audio input stream
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio input device found")]
    NoInputDevice,

    #[error("input device offers no f32 stream configuration")]
    NoSupportedConfig,

    #[error("failed to query input configurations: {0}")]
    QueryConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("invalid capture config: {0}")]
    InvalidConfig(String),

    #[error("chunk has {actual} samples, expected {expected}")]
    ChunkLength { expected: usize, actual: usize },
}

/// Failures setting up the window surface or overlay font
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to read font {path}: {source}")]
    ReadFont {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse font {path}: {reason}")]
    ParseFont { path: String, reason: String },
}
