//! White balance along the red/blue axis.
//!
//! Temperature is a ramped shift: the offset grows linearly from 0 at black
//! to `2·|t|` at white, so shadows stay neutral while highlights take the
//! cast. Positive values warm (red up, blue down), negative values cool.
//!
//! ```text
//! shift(v) = v × 2|t| / 255
//! warm(v)  = v + shift(v)
//! cool(v)  = v − shift(v)
//! t > 0:  R ← warm(R), B ← cool(B)
//! t < 0:  R ← cool(R), B ← warm(B)
//! ```

use crate::image::ColorBuffer;
use crate::transform::lut::Lut1D;

const RED: usize = 0;
const BLUE: usize = 2;

/// Build the `(red, blue)` tables for a temperature amount.
pub fn temperature_luts(temperature: f32) -> (Lut1D, Lut1D) {
    let span = 2.0 * temperature.abs();
    let shift = move |v: u8| f32::from(v) * span / 255.0;

    let warm = Lut1D::from_fn(|v| f32::from(v) + shift(v));
    let cool = Lut1D::from_fn(|v| f32::from(v) - shift(v));

    if temperature > 0.0 {
        (warm, cool)
    } else {
        (cool, warm)
    }
}

/// Apply a temperature shift. `0.0` is identity; green is never touched.
pub fn apply_temperature(mut rgb: ColorBuffer, temperature: f32) -> ColorBuffer {
    if temperature == 0.0 {
        return rgb;
    }
    let (red, blue) = temperature_luts(temperature);
    red.apply_channels(&mut rgb.pixels, &[RED]);
    blue.apply_channels(&mut rgb.pixels, &[BLUE]);
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_zero_is_identity() {
        let rgb = ColorBuffer::filled(2, 2, [100, 150, 200]);
        assert_eq!(apply_temperature(rgb.clone(), 0.0), rgb);
    }

    #[test]
    fn test_warm_raises_red_lowers_blue() {
        let out = apply_temperature(ColorBuffer::filled(1, 1, [100, 100, 100]), 20.0);
        // shift(100) = 100 × 40 / 255 ≈ 15.7
        assert_eq!(out.pixels[0], [116, 100, 84]);
    }

    #[test]
    fn test_cool_mirrors_warm() {
        let out = apply_temperature(ColorBuffer::filled(1, 1, [100, 100, 100]), -20.0);
        assert_eq!(out.pixels[0], [84, 100, 116]);
    }

    #[test]
    fn test_black_is_preserved() {
        let out = apply_temperature(ColorBuffer::filled(1, 1, [0, 0, 0]), 80.0);
        assert_eq!(out.pixels[0], [0, 0, 0]);
    }

    #[test]
    fn test_extreme_shift_clamps() {
        let out = apply_temperature(ColorBuffer::filled(1, 1, [255, 255, 255]), 300.0);
        assert_eq!(out.pixels[0], [255, 255, 0]);
    }
}
