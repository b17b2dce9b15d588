//! One bar per spectrum bin, hue sweeping across the spectrum.

use crate::audio::sanitize::{finite_max, normalized, sanitize_spectrum};
use crate::color::hsv_to_rgb;
use crate::render::{DrawList, FrameContext};

/// Fraction of screen height a full-scale bar reaches
const HEIGHT_SCALE: f32 = 0.8;

/// Brightness added to the glow outline
const GLOW_BOOST: f32 = 0.3;

pub fn render(ctx: &FrameContext, spectrum: &[f32], out: &mut DrawList) {
    let spectrum = sanitize_spectrum(spectrum);
    if spectrum.is_empty() {
        return;
    }

    let max = finite_max(&spectrum);
    let len = spectrum.len() as f32;
    let (width, height) = (ctx.width_f(), ctx.height_f());
    let bar_width = (width / len).max(1.0);
    let drawn_width = ((bar_width - 1.0) as u32).max(1);

    for (i, &magnitude) in spectrum.iter().enumerate() {
        let amplitude = normalized(magnitude, max);
        let bar_height = (amplitude * height * HEIGHT_SCALE).clamp(0.0, height);
        let hue = i as f32 / len;
        let brightness = (0.5 + amplitude * 0.5).clamp(0.0, 1.0);

        let x = (i as f32 * bar_width) as i32;
        let y = (height - bar_height) as i32;
        let drawn_height = (bar_height as u32).max(1);

        out.rect(x, y, drawn_width, drawn_height, hsv_to_rgb(hue, 1.0, brightness));

        let glow = hsv_to_rgb(hue, 1.0, (brightness + GLOW_BOOST).min(1.0));
        out.rect_outline(
            (x - 1).max(0),
            (y - 2).max(0),
            drawn_width + 2,
            drawn_height + 4,
            glow,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::modes::test_support::{assert_on_screen, ctx};
    use crate::render::Primitive;

    fn bars(out: &DrawList) -> Vec<(i32, i32, u32, u32)> {
        out.primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { x, y, w, h, .. } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_silence_draws_minimal_bars() {
        let mut out = DrawList::new();
        render(&ctx(0), &[0.0; 512], &mut out);

        let bars = bars(&out);
        assert_eq!(bars.len(), 512);
        assert_eq!(out.len(), 1024);
        assert!(bars.iter().all(|&(_, y, _, h)| y == 800 && h == 1));
        assert_on_screen(out.primitives(), 1200, 800);

        // Deterministic
        let mut again = DrawList::new();
        render(&ctx(0), &[0.0; 512], &mut again);
        assert_eq!(out.primitives(), again.primitives());
    }

    #[test]
    fn test_peak_bin_is_tallest_and_scaled() {
        let mut spectrum = vec![1.0; 512];
        spectrum[40] = 4.0;

        let mut out = DrawList::new();
        render(&ctx(0), &spectrum, &mut out);
        let bars = bars(&out);

        // Full-scale bar is 0.8 × 800 tall
        assert_eq!(bars[40].3, 640);
        assert_eq!(bars[40].1, 160);
        assert_eq!(bars[0].3, 160);
        // 1200 / 512 ≈ 2.34px per bin
        assert_eq!(bars[40].0, 93);
        assert_eq!(bars[40].2, 1);
    }

    #[test]
    fn test_corrupt_spectrum_is_silence() {
        let mut out = DrawList::new();
        render(&ctx(0), &[f32::NAN; 64], &mut out);
        assert!(bars(&out).iter().all(|&(_, _, _, h)| h == 1));

        let mut out = DrawList::new();
        render(&ctx(0), &[], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_glow_is_brighter_outline() {
        let mut out = DrawList::new();
        render(&ctx(0), &[0.0; 4], &mut out);

        match (&out.primitives()[0], &out.primitives()[1]) {
            (
                Primitive::Rect { x, color: bar, .. },
                Primitive::RectOutline {
                    x: gx, color: glow, ..
                },
            ) => {
                assert_eq!(*gx, (*x - 1).max(0));
                // Hue 0 at brightness 0.5 vs 0.8
                assert_eq!(bar.r, 127);
                assert_eq!(glow.r, 204);
            }
            other => panic!("unexpected primitives {:?}", other),
        }
    }
}
