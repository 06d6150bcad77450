//! Exposure and brightness/contrast, all expressed as per-channel LUTs.
//!
//! # Formulas
//! ```text
//! exposure:   gamma = 1 − e / 125
//!             out   = 255 × (in / 255)^(1 / gamma)
//! brightness: out   = in + b
//! contrast:   f     = 131 × (c + 127) / (127 × (131 − c))
//!             out   = f × in + 127 × (1 − f)
//! ```

use crate::image::ColorBuffer;
use crate::transform::lut::Lut1D;

/// Exposure at or above this value drives gamma to zero or below.
pub const EXPOSURE_LIMIT: f32 = 125.0;

/// Contrast at or above this value drives the factor denominator to zero or below.
pub const CONTRAST_LIMIT: f32 = 131.0;

const ALL_CHANNELS: [usize; 3] = [0, 1, 2];

/// Bake the exposure curve. Caller guarantees `exposure < EXPOSURE_LIMIT`.
///
/// Positive values raise the exponent above 1, pulling midtones down;
/// negative values lift them. Black and white are fixed points.
pub fn exposure_lut(exposure: f32) -> Lut1D {
    let gamma = 1.0 - exposure / EXPOSURE_LIMIT;
    let inv_gamma = 1.0 / gamma;
    Lut1D::from_fn(|v| 255.0 * (f32::from(v) / 255.0).powf(inv_gamma))
}

/// Apply exposure to all three channels. `0.0` is identity.
pub fn apply_exposure(mut rgb: ColorBuffer, exposure: f32) -> ColorBuffer {
    if exposure == 0.0 {
        return rgb;
    }
    exposure_lut(exposure).apply_channels(&mut rgb.pixels, &ALL_CHANNELS);
    rgb
}

/// Linear gain for a contrast amount. `0.0` yields exactly `1.0`.
pub fn contrast_factor(contrast: f32) -> f32 {
    131.0 * (contrast + 127.0) / (127.0 * (CONTRAST_LIMIT - contrast))
}

/// Apply brightness, then contrast, each skipped when zero.
///
/// The two steps round and clamp independently, so a brightness push that
/// clips highlights stays clipped through the contrast step.
pub fn apply_brightness_contrast(mut rgb: ColorBuffer, brightness: f32, contrast: f32) -> ColorBuffer {
    if brightness != 0.0 {
        Lut1D::from_fn(|v| f32::from(v) + brightness).apply_channels(&mut rgb.pixels, &ALL_CHANNELS);
    }
    if contrast != 0.0 {
        let f = contrast_factor(contrast);
        Lut1D::from_fn(|v| f * f32::from(v) + 127.0 * (1.0 - f))
            .apply_channels(&mut rgb.pixels, &ALL_CHANNELS);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn buffer(values: &[[u8; 3]]) -> ColorBuffer {
        let mut buf = ColorBuffer::filled(values.len() as u32, 1, [0, 0, 0]);
        buf.pixels = values.to_vec();
        buf
    }

    #[test]
    fn test_exposure_zero_is_identity() {
        let lut = exposure_lut(0.0);
        assert!((0..=255u8).all(|v| lut.get(v) == v));
        let input = buffer(&[[10, 128, 250]]);
        assert_eq!(apply_exposure(input.clone(), 0.0), input);
    }

    #[test]
    fn test_exposure_keeps_endpoints() {
        for e in [-100.0, -30.0, 40.0, 100.0] {
            let lut = exposure_lut(e);
            assert_eq!(lut.get(0), 0, "e = {e}");
            assert_eq!(lut.get(255), 255, "e = {e}");
        }
    }

    #[test]
    fn test_exposure_midtone_values() {
        // e = 50: gamma 0.6, 255 × (128/255)^(1/0.6) ≈ 80.9
        assert_eq!(exposure_lut(50.0).get(128), 81);
        // e = −50: gamma 1.4, 255 × (128/255)^(1/1.4) ≈ 155.9
        assert_eq!(exposure_lut(-50.0).get(128), 156);
    }

    #[test]
    fn test_contrast_factor_zero_is_unity() {
        assert!((contrast_factor(0.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_contrast_spreads_around_midpoint() {
        let out = apply_brightness_contrast(buffer(&[[0, 128, 255]]), 0.0, 50.0);
        // f ≈ 2.254: 0 → −159 (clamped), 128 → 129.25, 255 → 415.5 (clamped)
        assert_eq!(out.pixels, vec![[0, 129, 255]]);
    }

    #[test]
    fn test_negative_contrast_flattens() {
        let out = apply_brightness_contrast(buffer(&[[0, 255, 127]]), 0.0, -127.0);
        assert_eq!(out.pixels, vec![[127, 127, 127]]);
    }

    #[test]
    fn test_brightness_adds_and_clamps() {
        let out = apply_brightness_contrast(buffer(&[[0, 128, 250]]), 10.0, 0.0);
        assert_eq!(out.pixels, vec![[10, 138, 255]]);
        let out = apply_brightness_contrast(buffer(&[[5, 128, 250]]), -10.0, 0.0);
        assert_eq!(out.pixels, vec![[0, 118, 240]]);
    }

    #[test]
    fn test_brightness_runs_before_contrast() {
        let both = apply_brightness_contrast(buffer(&[[100, 140, 200]]), 20.0, 30.0);
        let stepwise = apply_brightness_contrast(
            apply_brightness_contrast(buffer(&[[100, 140, 200]]), 20.0, 0.0),
            0.0,
            30.0,
        );
        assert_eq!(both, stepwise);
    }
}
