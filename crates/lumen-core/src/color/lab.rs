//! RGB ↔ CIE L*a*b* for 8-bit pixels.
//!
//! The colorimetry (sRGB transfer, D65 white, XYZ → Lab) comes from `palette`;
//! this module only packs the result into bytes:
//!
//! ```text
//! L8 = L* × 255 / 100
//! a8 = a* + 128
//! b8 = b* + 128
//! ```

use palette::{FromColor, Lab, LinSrgb, Srgb};

use crate::image::to_u8;

/// Byte offset applied to the a* and b* axes.
const CHROMA_OFFSET: f32 = 128.0;
/// Byte scale for L* (which spans `[0, 100]`).
const LIGHTNESS_SCALE: f32 = 255.0 / 100.0;

/// Convert one sRGB pixel to packed LAB.
pub fn rgb_to_lab([r, g, b]: [u8; 3]) -> [u8; 3] {
    let srgb = Srgb::new(r, g, b).into_format::<f32>();
    let linear: LinSrgb = srgb.into_linear();
    let lab = Lab::from_color(linear);
    [
        to_u8(lab.l * LIGHTNESS_SCALE),
        to_u8(lab.a + CHROMA_OFFSET),
        to_u8(lab.b + CHROMA_OFFSET),
    ]
}

/// Convert one packed LAB pixel back to sRGB, clipping out-of-gamut colors.
pub fn lab_to_rgb([l, a, b]: [u8; 3]) -> [u8; 3] {
    let lab: Lab = Lab::new(
        f32::from(l) / LIGHTNESS_SCALE,
        f32::from(a) - CHROMA_OFFSET,
        f32::from(b) - CHROMA_OFFSET,
    );
    let linear = LinSrgb::from_color(lab);
    let srgb: Srgb = Srgb::from_linear(linear);
    [
        to_u8(srgb.red * 255.0),
        to_u8(srgb.green * 255.0),
        to_u8(srgb.blue * 255.0),
    ]
}
