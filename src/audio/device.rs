//! cpal input backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleFormat, SampleRate, StreamConfig, SupportedBufferSize};

use super::capture::ChunkProcessor;
use super::source::CaptureBackend;
use crate::error::AudioError;
use crate::params::CaptureConfig;

/// Default host's default input device
pub struct CpalBackend {
    host: cpal::Host,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for CpalBackend {
    type Stream = cpal::Stream;

    fn open(
        &self,
        config: &CaptureConfig,
        mut processor: ChunkProcessor,
    ) -> Result<cpal::Stream, AudioError> {
        let device = self
            .host
            .default_input_device()
            .ok_or(AudioError::NoInputDevice)?;

        let ranges: Vec<_> = device
            .supported_input_configs()?
            .filter(|range| range.sample_format() == SampleFormat::F32)
            .collect();

        let (index, rate) = ranges
            .iter()
            .enumerate()
            .map(|(i, range)| {
                let rank = rank_range(
                    range.channels(),
                    range.min_sample_rate().0,
                    range.max_sample_rate().0,
                    config,
                );
                (i, rank)
            })
            .min_by_key(|(_, rank)| *rank)
            .map(|(i, rank)| (i, rank.rate))
            .ok_or(AudioError::NoSupportedConfig)?;

        let supported = ranges[index].clone().with_sample_rate(SampleRate(rate));
        let channels = supported.channels();

        let buffer_size = match supported.buffer_size() {
            SupportedBufferSize::Range { min, max }
                if (*min..=*max).contains(&(config.chunk_size as u32)) =>
            {
                BufferSize::Fixed(config.chunk_size as u32)
            }
            _ => BufferSize::Default,
        };

        let stream_config = StreamConfig {
            channels,
            sample_rate: supported.sample_rate(),
            buffer_size,
        };

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s), buffer {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            rate,
            channels,
            buffer_size
        );
        if rate != config.sample_rate_hz {
            log::warn!(
                "Device does not offer {}Hz, using nearest rate {}Hz",
                config.sample_rate_hz,
                rate
            );
        }

        let frame_channels = channels as usize;
        let stream = device.build_input_stream(
            &stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                processor.push_interleaved(data, frame_channels);
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(stream)
    }
}

/// Ordering key for a supported configuration range (lower is better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RangeRank {
    channel_mismatch: bool,
    rate_distance: u32,
    channels: u16,
    rate: u32,
}

/// Prefer the requested channel count, then the rate closest to the
/// requested one, then fewer channels.
fn rank_range(channels: u16, min_rate: u32, max_rate: u32, config: &CaptureConfig) -> RangeRank {
    let rate = nearest_rate(min_rate, max_rate, config.sample_rate_hz);
    RangeRank {
        channel_mismatch: channels != config.channels,
        rate_distance: rate.abs_diff(config.sample_rate_hz),
        channels,
        rate,
    }
}

fn nearest_rate(min_rate: u32, max_rate: u32, requested: u32) -> u32 {
    requested.clamp(min_rate.min(max_rate), max_rate.max(min_rate))
}
