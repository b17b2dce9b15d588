//! Full-screen plasma on a coarse grid, nudged by the spectrum.
//!
//! This is the heaviest mode (one color per 4×4 cell), so rows are computed
//! in parallel and concatenated in row order.

use rayon::prelude::*;

use crate::audio::sanitize::{finite_max, finite_mean, normalized, sanitize_spectrum};
use crate::color::hsv_to_rgb;
use crate::render::{DrawList, FrameContext, Primitive};

/// Cell edge length (pixels)
const CELL: u32 = 4;

pub fn render(ctx: &FrameContext, spectrum: &[f32], out: &mut DrawList) {
    let spectrum = sanitize_spectrum(spectrum);
    if spectrum.is_empty() || ctx.width == 0 || ctx.height == 0 {
        return;
    }

    let max = finite_max(&spectrum);
    // Raw mean magnitude, added to brightness unscaled
    let avg_volume = finite_mean(&spectrum) as f64;
    let t = ctx.time_f64();
    let width = ctx.width_f();

    // Intensity depends only on x, so compute it once per column
    let columns: Vec<(u32, f64)> = (0..ctx.width)
        .step_by(CELL as usize)
        .map(|x| {
            let bin = ((x as f32 / width) * spectrum.len() as f32) as usize;
            let bin = bin.min(spectrum.len() - 1);
            (x, normalized(spectrum[bin], max) as f64)
        })
        .collect();

    let phase_x = t * 0.1;
    let phase_y = t * 0.075;
    let phase_xy = t * 0.05;
    let hue_shift = (t * 0.01).rem_euclid(1.0);

    let rows: Vec<u32> = (0..ctx.height).step_by(CELL as usize).collect();
    let cells: Vec<Primitive> = rows
        .par_iter()
        .flat_map_iter(|&y| {
            columns.iter().map(move |&(x, intensity)| {
                let (xf, yf) = (x as f64, y as f64);
                let value = (xf * 0.01 + phase_x).sin()
                    + (yf * 0.01 + phase_y).sin()
                    + ((xf + yf) * 0.005 + phase_xy).sin()
                    + intensity * 2.0;

                let normalized = (value + 4.0) / 8.0;
                let hue = (normalized + hue_shift).rem_euclid(1.0);
                let brightness = (0.3 + normalized * 0.7 + avg_volume * 0.5).min(1.0);

                Primitive::Rect {
                    x: x as i32,
                    y: y as i32,
                    w: CELL,
                    h: CELL,
                    color: hsv_to_rgb(hue as f32, 1.0, brightness as f32),
                }
            })
        })
        .collect();

    out.extend(cells);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::modes::test_support::{assert_on_screen, ctx};

    #[test]
    fn test_covers_screen_in_cells() {
        let mut out = DrawList::new();
        render(&ctx(0), &[0.0; 512], &mut out);

        // 1200/4 × 800/4
        assert_eq!(out.len(), 300 * 200);
        assert!(matches!(
            out.primitives()[0],
            Primitive::Rect {
                x: 0,
                y: 0,
                w: 4,
                h: 4,
                ..
            }
        ));
        // Row-major: second cell is one column right
        assert!(matches!(out.primitives()[1], Primitive::Rect { x: 4, y: 0, .. }));
        assert!(matches!(out.primitives()[300], Primitive::Rect { x: 0, y: 4, .. }));
        assert_on_screen(out.primitives(), 1200, 800);
    }

    fn out_color(out: &DrawList, index: usize) -> crate::color::Rgba {
        match &out.primitives()[index] {
            Primitive::Rect { color, .. } => *color,
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_silence_is_deterministic() {
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        render(&ctx(5), &[0.0; 512], &mut a);
        render(&ctx(5), &[0.0; 512], &mut b);
        assert_eq!(a.primitives(), b.primitives());

        // Origin at t=0: value 0 → normalized 0.5, hue 0.5, brightness 0.65
        let mut origin = DrawList::new();
        render(&ctx(0), &[0.0; 512], &mut origin);
        assert_eq!(out_color(&origin, 0), hsv_to_rgb(0.5, 1.0, 0.65));
    }

    #[test]
    fn test_loud_low_bins_change_left_columns() {
        let mut spectrum = vec![0.0; 512];
        spectrum[0] = 1.0;

        let mut quiet = DrawList::new();
        let mut loud = DrawList::new();
        render(&ctx(0), &[0.0; 512], &mut quiet);
        render(&ctx(0), &spectrum, &mut loud);

        assert_ne!(out_color(&quiet, 0), out_color(&loud, 0));
    }
}
