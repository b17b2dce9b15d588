//! Vibescope library - real-time audio-reactive visualizer

pub mod audio;
pub mod cli;
pub mod color;
pub mod error;
pub mod frame_loop;
pub mod pacing;
pub mod params;
pub mod particles;
pub mod render;
