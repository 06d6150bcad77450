//! Vibrance and saturation in HSV.
//!
//! ```text
//! vibrance:   S ← S + (v / 100) × (255 − S)     only where S < 180
//! saturation: S ← S × (s + 100) / 100
//! ```
//!
//! Pixels whose saturation byte does not change keep their original RGB,
//! so neutral and already-vivid pixels never pick up round-trip drift.

use crate::color::ColorConverter;
use crate::grading::recombine;
use crate::image::{ColorBuffer, to_u8};

/// Saturation byte at or above which vibrance leaves a pixel alone.
pub const VIBRANCE_SATURATION_LIMIT: u8 = 180;

/// Boost muted colors toward full saturation, protecting vivid ones.
pub fn apply_vibrance(rgb: ColorBuffer, amount: f32, converter: &dyn ColorConverter) -> ColorBuffer {
    if amount == 0.0 {
        return rgb;
    }
    let k = amount / 100.0;
    map_saturation(rgb, converter, |s| {
        if s < VIBRANCE_SATURATION_LIMIT {
            to_u8(f32::from(s) + k * (255.0 - f32::from(s)))
        } else {
            s
        }
    })
}

/// Scale saturation uniformly. `-100` removes all color.
pub fn apply_saturation(rgb: ColorBuffer, amount: f32, converter: &dyn ColorConverter) -> ColorBuffer {
    if amount == 0.0 {
        return rgb;
    }
    let factor = (amount + 100.0) / 100.0;
    map_saturation(rgb, converter, |s| to_u8(f32::from(s) * factor))
}

fn map_saturation(
    rgb: ColorBuffer,
    converter: &dyn ColorConverter,
    f: impl Fn(u8) -> u8,
) -> ColorBuffer {
    let mut hsv = converter.rgb_to_hsv(&rgb);
    let mut touched = vec![false; hsv.pixels.len()];
    for (px, t) in hsv.pixels.iter_mut().zip(touched.iter_mut()) {
        let s = f(px[1]);
        if s != px[1] {
            px[1] = s;
            *t = true;
        }
    }
    if !touched.contains(&true) {
        return rgb;
    }
    let converted = converter.hsv_to_rgb(&hsv);
    recombine(rgb, converted, &touched)
}
