//! Grading operators for tone, white balance, lightness, local contrast
//! and saturation.
//!
//! Every operator takes an RGB [`ColorBuffer`] by value and returns an RGB
//! buffer of the same size. Operators that work in another space convert
//! internally through the supplied [`ColorConverter`](crate::color::ColorConverter).

pub mod clarity;
pub mod hsl;
pub mod lightness;
pub mod saturation;
pub mod temperature;
pub mod tone;

use crate::image::ColorBuffer;

/// Take converted pixels only where `touched` is set; everything else keeps
/// its original RGB bytes instead of a lossy round trip.
pub(crate) fn recombine(
    original: ColorBuffer,
    converted: ColorBuffer,
    touched: &[bool],
) -> ColorBuffer {
    let pixels = original
        .pixels
        .iter()
        .zip(&converted.pixels)
        .zip(touched)
        .map(|((&orig, &conv), &t)| if t { conv } else { orig })
        .collect();
    ColorBuffer { pixels, ..original }
}
