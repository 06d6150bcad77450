//! RGB ↔ HSV for 8-bit pixels.
//!
//! Hue is stored at half scale so a full turn fits in a byte: `H = degrees / 2`,
//! giving `[0, 180)`. Saturation and value span `[0, 255]`.
//!
//! ```text
//! V = max(R, G, B)
//! S = 255 × (V − min) / V                     (0 when V = 0)
//! H = 60 × (G − B) / Δ          if V = R
//!     120 + 60 × (B − R) / Δ    if V = G
//!     240 + 60 × (R − G) / Δ    if V = B      (0 when Δ = 0, then halved)
//! ```

use crate::image::to_u8;

/// Number of hue steps in a full turn.
pub const HUE_RANGE: u8 = 180;

/// Convert one RGB pixel to packed HSV.
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = f32::from(max - min);

    let s = if max == 0 {
        0
    } else {
        to_u8(255.0 * delta / f32::from(max))
    };

    if delta == 0.0 {
        return [0, s, max];
    }

    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    let mut degrees = if max as f32 == r {
        60.0 * (g - b) / delta
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if degrees < 0.0 {
        degrees += 360.0;
    }

    let h = (degrees / 2.0).round() as u32 % u32::from(HUE_RANGE);
    [h as u8, s, max]
}

/// Convert one packed HSV pixel back to RGB.
pub fn hsv_to_rgb([h, s, v]: [u8; 3]) -> [u8; 3] {
    if s == 0 {
        return [v, v, v];
    }

    let sector_pos = f32::from(h % HUE_RANGE) * 2.0 / 60.0;
    let sector = sector_pos.floor();
    let f = sector_pos - sector;

    let s = f32::from(s) / 255.0;
    let v = f32::from(v);
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_u8(r), to_u8(g), to_u8(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
        assert_eq!(rgb_to_hsv([255, 255, 0]), [30, 255, 255]);
        assert_eq!(rgb_to_hsv([255, 0, 255]), [150, 255, 255]);
    }

    #[test]
    fn test_gray_has_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
        assert_eq!(hsv_to_rgb([97, 0, 200]), [200, 200, 200]);
    }

    #[test]
    fn test_hue_stays_below_range() {
        // Hue just under 360° rounds up to 180 and must wrap to 0.
        let [h, _, _] = rgb_to_hsv([255, 0, 1]);
        assert!(h < HUE_RANGE);
    }

    #[test]
    fn test_primaries_round_trip_exactly() {
        for rgb in [
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [255, 255, 0],
            [0, 255, 255],
            [255, 0, 255],
            [77, 77, 77],
        ] {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(rgb)), rgb, "{rgb:?}");
        }
    }

    #[test]
    fn test_round_trip_within_rounding() {
        for rgb in [[200, 120, 40], [12, 180, 99], [90, 30, 210], [250, 240, 5]] {
            let back = hsv_to_rgb(rgb_to_hsv(rgb));
            for c in 0..3 {
                let diff = (i16::from(back[c]) - i16::from(rgb[c])).abs();
                assert!(diff <= 4, "{rgb:?} -> {back:?}");
            }
        }
    }
}
