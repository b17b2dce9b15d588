//! Color types and HSV → RGB conversion shared by every renderer.

use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Convert hue/saturation/value (each in [0,1]) to an opaque color.
///
/// Hue wraps; saturation and value are clamped. Non-finite inputs resolve
/// to 0 so callers never have to pre-check.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgba {
    let h = if h.is_finite() { h.rem_euclid(1.0) } else { 0.0 };
    let s = if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 };
    let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = h * 6.0;
        let i = (sector.floor() as i32).rem_euclid(6);
        let f = sector - sector.floor();
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match i {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    // Truncate like an int() cast on the scaled value
    Rgba::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgba::rgb(255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgba::rgb(0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-0.5, 1.0, 1.0), hsv_to_rgb(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        assert_eq!(hsv_to_rgb(0.3, 0.0, 0.5), Rgba::rgb(127, 127, 127));
    }

    #[test]
    fn test_non_finite_inputs_are_black() {
        assert_eq!(hsv_to_rgb(f32::NAN, 1.0, f32::NAN), Rgba::BLACK);
        assert_eq!(hsv_to_rgb(0.0, 1.0, f32::INFINITY), Rgba::BLACK);
    }
}
