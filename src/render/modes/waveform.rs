//! Oscilloscope trace with a dimmer mirror image underneath.

use crate::audio::sanitize::sanitize_waveform;
use crate::render::{DrawList, FrameContext};

/// Fraction of half-height a full-scale sample reaches
const AMPLITUDE_SCALE: f32 = 0.8;

const LINE_WIDTH: u32 = 3;
const MIRROR_LINE_WIDTH: u32 = 2;

pub fn render(ctx: &FrameContext, waveform: &[f32], out: &mut DrawList) {
    let samples = sanitize_waveform(waveform);
    if samples.len() < 2 {
        return;
    }

    let (width, height) = (ctx.width_f(), ctx.height_f());
    let center = (ctx.height / 2) as f32;
    let len = samples.len() as f32;

    let points: Vec<(i32, i32)> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let x = (i as f32 * width / len).clamp(0.0, width);
            let y = (center + s * center * AMPLITUDE_SCALE).clamp(0.0, height);
            (x as i32, y as i32)
        })
        .collect();

    let mirror: Vec<(i32, i32)> = points
        .iter()
        .map(|&(x, y)| (x, (ctx.height as i32 - y).clamp(0, ctx.height as i32)))
        .collect();

    out.polyline(mirror, MIRROR_LINE_WIDTH, ctx.palette.primary_dim);
    out.polyline(points, LINE_WIDTH, ctx.palette.primary);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::modes::test_support::{assert_on_screen, ctx};
    use crate::render::Primitive;

    fn lines(out: &DrawList) -> Vec<(&[(i32, i32)], u32)> {
        out.primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Polyline { points, width, .. } => Some((points.as_slice(), *width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_silence_is_flat_centre_line() {
        let mut out = DrawList::new();
        render(&ctx(0), &[0.0; 1024], &mut out);

        let lines = lines(&out);
        assert_eq!(lines.len(), 2);
        let (mirror, mirror_width) = lines[0];
        let (main, main_width) = lines[1];

        assert_eq!(main_width, 3);
        assert_eq!(mirror_width, 2);
        assert_eq!(main.len(), 1024);
        assert!(main.iter().all(|&(_, y)| y == 400));
        assert!(mirror.iter().all(|&(_, y)| y == 400));
    }

    #[test]
    fn test_full_scale_samples_and_mirror() {
        let mut out = DrawList::new();
        render(&ctx(0), &[1.0, -1.0, 5.0, f32::NAN], &mut out);

        let lines = lines(&out);
        let (mirror, _) = lines[0];
        let (main, _) = lines[1];

        assert_eq!(main, &[(0, 720), (300, 80), (600, 720), (900, 400)]);
        assert_eq!(mirror, &[(0, 80), (300, 720), (600, 80), (900, 400)]);
        assert_on_screen(out.primitives(), 1200, 800);
    }

    #[test]
    fn test_mirror_is_drawn_beneath_in_dim_color() {
        let ctx = ctx(0);
        let mut out = DrawList::new();
        render(&ctx, &[0.1, 0.2], &mut out);

        match out.primitives() {
            [Primitive::Polyline { color: first, .. }, Primitive::Polyline { color: second, .. }] => {
                assert_eq!(*first, ctx.palette.primary_dim);
                assert_eq!(*second, ctx.palette.primary);
            }
            other => panic!("unexpected primitives {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_input_draws_nothing() {
        let mut out = DrawList::new();
        render(&ctx(0), &[], &mut out);
        render(&ctx(0), &[0.5], &mut out);
        assert!(out.is_empty());
    }
}
