//! Numeric cleanup for raw sample and spectrum vectors.
//!
//! Device glitches and silence artifacts can leave NaN or infinite values in
//! a buffer. Nothing non-finite may reach drawn geometry, so every chunk is
//! cleaned here before analysis and again before each draw.

/// Replace NaN/±Inf with 0.0 and clip to [-1, 1]
pub fn sanitize_waveform(samples: &[f32]) -> Vec<f32> {
    samples.iter().map(|&s| clean_sample(s)).collect()
}

/// Replace NaN/±Inf and negative magnitudes with 0.0
pub fn sanitize_spectrum(magnitudes: &[f32]) -> Vec<f32> {
    magnitudes.iter().map(|&m| clean_magnitude(m)).collect()
}

/// In-place variant of [`sanitize_waveform`]
pub fn sanitize_waveform_in_place(samples: &mut [f32]) {
    for s in samples {
        *s = clean_sample(*s);
    }
}

/// In-place variant of [`sanitize_spectrum`]
pub fn sanitize_spectrum_in_place(magnitudes: &mut [f32]) {
    for m in magnitudes {
        *m = clean_magnitude(*m);
    }
}

/// Largest finite value, or 0.0 when there is none
pub fn finite_max(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f32::max)
}

/// Mean of the finite values, or 0.0 when there are none
pub fn finite_mean(values: &[f32]) -> f32 {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0usize), |(sum, n), &v| (sum + v as f64, n + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64) as f32
    }
}

/// `value / max` clamped to [0, 1]; a zero or non-finite max (or value)
/// yields 0.0
pub fn normalized(value: f32, max: f32) -> f32 {
    if max > 0.0 && max.is_finite() && value.is_finite() {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn clean_sample(s: f32) -> f32 {
    if s.is_finite() {
        s.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn clean_magnitude(m: f32) -> f32 {
    if m.is_finite() && m > 0.0 {
        m
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrupted() -> Vec<f32> {
        vec![
            0.25,
            f32::NAN,
            f32::INFINITY,
            f32::NEG_INFINITY,
            3.5,
            -7.0,
            -0.5,
            1.0,
        ]
    }

    #[test]
    fn test_waveform_is_finite_and_clipped() {
        let clean = sanitize_waveform(&corrupted());

        assert_eq!(clean.len(), 8);
        assert!(clean.iter().all(|s| s.is_finite() && (-1.0..=1.0).contains(s)));
        assert_eq!(clean, vec![0.25, 0.0, 0.0, 0.0, 1.0, -1.0, -0.5, 1.0]);
    }

    #[test]
    fn test_spectrum_is_finite_and_non_negative() {
        let clean = sanitize_spectrum(&corrupted());

        assert_eq!(clean.len(), 8);
        assert!(clean.iter().all(|m| m.is_finite() && *m >= 0.0));
        // Magnitudes are not clipped to 1
        assert_eq!(clean[4], 3.5);
        assert_eq!(clean[5], 0.0);
    }

    #[test]
    fn test_in_place_matches_copying() {
        let mut samples = corrupted();
        sanitize_waveform_in_place(&mut samples);
        assert_eq!(samples, sanitize_waveform(&corrupted()));

        let mut mags = corrupted();
        sanitize_spectrum_in_place(&mut mags);
        assert_eq!(mags, sanitize_spectrum(&corrupted()));
    }

    #[test]
    fn test_finite_stats_ignore_corruption() {
        let values = [1.0, f32::NAN, 3.0, f32::INFINITY];
        assert_eq!(finite_max(&values), 3.0);
        assert_eq!(finite_mean(&values), 2.0);

        assert_eq!(finite_max(&[]), 0.0);
        assert_eq!(finite_mean(&[f32::NAN]), 0.0);
    }

    #[test]
    fn test_normalized_guards_degenerate_max() {
        assert_eq!(normalized(2.0, 4.0), 0.5);
        assert_eq!(normalized(8.0, 4.0), 1.0);
        assert_eq!(normalized(1.0, 0.0), 0.0);
        assert_eq!(normalized(1.0, f32::NAN), 0.0);
        assert_eq!(normalized(f32::NAN, 1.0), 0.0);
    }
}
