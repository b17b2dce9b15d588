//! The five visualization modes and their dispatch.

mod bars;
mod particles;
mod plasma;
mod spiral;
mod waveform;

use super::{DrawList, FrameContext};
use crate::audio::SignalSnapshot;
use crate::particles::ParticleField;

/// Active visualization; selected by keys 1–5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationMode {
    #[default]
    FrequencyBars,
    Waveform,
    Particles,
    Spiral,
    Plasma,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 5] = [
        VisualizationMode::FrequencyBars,
        VisualizationMode::Waveform,
        VisualizationMode::Particles,
        VisualizationMode::Spiral,
        VisualizationMode::Plasma,
    ];

    /// Mode for a 1-based ordinal
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1..=5 => Some(Self::ALL[ordinal as usize - 1]),
            _ => None,
        }
    }

    /// 1-based ordinal
    pub fn ordinal(self) -> u8 {
        match self {
            Self::FrequencyBars => 1,
            Self::Waveform => 2,
            Self::Particles => 3,
            Self::Spiral => 4,
            Self::Plasma => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FrequencyBars => "Frequency Bars",
            Self::Waveform => "Waveform",
            Self::Particles => "Particles",
            Self::Spiral => "Spiral",
            Self::Plasma => "Plasma",
        }
    }

    /// Append this mode's primitives for the current snapshot.
    ///
    /// Only reads the particle field; the frame loop advances it.
    pub fn render(
        self,
        ctx: &FrameContext,
        signal: &SignalSnapshot,
        field: &ParticleField,
        out: &mut DrawList,
    ) {
        match self {
            Self::FrequencyBars => bars::render(ctx, &signal.spectrum, out),
            Self::Waveform => waveform::render(ctx, &signal.waveform, out),
            Self::Particles => particles::render(ctx, &signal.spectrum, field, out),
            Self::Spiral => spiral::render(ctx, &signal.spectrum, out),
            Self::Plasma => plasma::render(ctx, &signal.spectrum, out),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::params::Palette;
    use crate::render::{FrameContext, Primitive};

    pub fn ctx(time: u64) -> FrameContext {
        FrameContext {
            width: 1200,
            height: 800,
            time,
            palette: Palette::default(),
        }
    }

    /// Every coordinate and size in the list is on-screen
    pub fn assert_on_screen(primitives: &[Primitive], width: i32, height: i32) {
        for p in primitives {
            match p {
                Primitive::Circle { cx, cy, .. } => {
                    assert!((0..=width).contains(cx) && (0..=height).contains(cy), "{:?}", p);
                }
                Primitive::Polyline { points, .. } => {
                    for (x, y) in points {
                        assert!((0..=width).contains(x) && (0..=height).contains(y), "{:?}", p);
                    }
                }
                Primitive::Rect { x, y, .. } | Primitive::RectOutline { x, y, .. } => {
                    assert!((0..=width).contains(x) && (0..=height).contains(y), "{:?}", p);
                }
                Primitive::Text { .. } => {}
            }
        }
    }
}
