//! Highlights and shadows: lightness-only edits in LAB.
//!
//! Only L is rewritten; a and b pass through untouched so hue and chroma
//! hold while tones move.
//!
//! ```text
//! highlights: L ← L + (h / 100) × (255 − L)
//! shadows:    L ← L + (s / 100) × L
//! ```

use crate::color::ColorConverter;
use crate::image::ColorBuffer;
use crate::transform::lut::Lut1D;

/// Move lightness toward (or away from) white, scaled by remaining headroom.
pub fn apply_highlights(rgb: ColorBuffer, amount: f32, converter: &dyn ColorConverter) -> ColorBuffer {
    if amount == 0.0 {
        return rgb;
    }
    let k = amount / 100.0;
    adjust_lightness(&rgb, converter, |l| l + k * (255.0 - l))
}

/// Scale lightness by `1 + s/100`; black stays black.
pub fn apply_shadows(rgb: ColorBuffer, amount: f32, converter: &dyn ColorConverter) -> ColorBuffer {
    if amount == 0.0 {
        return rgb;
    }
    let k = amount / 100.0;
    adjust_lightness(&rgb, converter, |l| l + k * l)
}

fn adjust_lightness(
    rgb: &ColorBuffer,
    converter: &dyn ColorConverter,
    curve: impl Fn(f32) -> f32,
) -> ColorBuffer {
    let mut lab = converter.rgb_to_lab(rgb);
    Lut1D::from_fn(|l| curve(f32::from(l))).apply_channels(&mut lab.pixels, &[0]);
    converter.lab_to_rgb(&lab)
}
