//! Per-hue-band HSL correction.
//!
//! Each band is a fixed inclusive range on the 8-bit hue channel
//! (half degrees, `[0, 180)`). Red wraps around zero.
//!
//! | Band    | Hue range          |
//! |---------|--------------------|
//! | red     | 170–180 ∪ 0–10     |
//! | yellow  | 15–35              |
//! | green   | 40–80              |
//! | cyan    | 85–105             |
//! | blue    | 110–130            |
//! | magenta | 140–165            |
//!
//! For every masked pixel:
//! ```text
//! H ← (H + hue) mod 180
//! S ← clamp(S × (1 + saturation))
//! V ← clamp(V + lightness)
//! ```
//! Bands run in the table's order on one HSV buffer; each mask is computed
//! from the hue as left by the bands before it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::ColorConverter;
use crate::color::hsv::HUE_RANGE;
use crate::grading::recombine;
use crate::image::{ColorBuffer, to_u8};

/// A perceptual color family selected by hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HueBand {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
}

impl HueBand {
    /// All bands in processing order.
    pub const ALL: [HueBand; 6] = [
        HueBand::Red,
        HueBand::Yellow,
        HueBand::Green,
        HueBand::Cyan,
        HueBand::Blue,
        HueBand::Magenta,
    ];

    /// Inclusive hue ranges covered by this band.
    pub const fn ranges(self) -> &'static [(u8, u8)] {
        match self {
            Self::Red => &[(170, 180), (0, 10)],
            Self::Yellow => &[(15, 35)],
            Self::Green => &[(40, 80)],
            Self::Cyan => &[(85, 105)],
            Self::Blue => &[(110, 130)],
            Self::Magenta => &[(140, 165)],
        }
    }

    /// Lowercase name used in adjustment mappings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
        }
    }

    /// Parse a band name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.name() == name)
    }

    /// Whether an 8-bit hue falls in this band.
    pub fn contains(self, hue: u8) -> bool {
        self.ranges()
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&hue))
    }

    /// Per-pixel membership over an HSV buffer.
    pub fn mask(self, hsv: &ColorBuffer) -> Vec<bool> {
        hsv.pixels.iter().map(|px| self.contains(px[0])).collect()
    }
}

impl fmt::Display for HueBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Correction applied to one hue band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HslCorrection {
    /// Hue shift in 8-bit hue steps (half degrees).
    #[serde(rename = "h", alias = "hue", default)]
    pub hue: f32,
    /// Saturation scale; S is multiplied by `1 + saturation`, so `-1` or
    /// below removes all saturation.
    #[serde(rename = "s", alias = "saturation", default)]
    pub saturation: f32,
    /// Value shift on the 0–255 scale.
    #[serde(rename = "l", alias = "lightness", default)]
    pub lightness: f32,
}

impl HslCorrection {
    /// All three components neutral.
    pub fn is_identity(&self) -> bool {
        self.hue == 0.0 && self.saturation == 0.0 && self.lightness == 0.0
    }

    fn apply(&self, px: &mut [u8; 3]) {
        let range = f32::from(HUE_RANGE);
        let hue = (f32::from(px[0]) + self.hue).round().rem_euclid(range);
        px[0] = (hue as u8) % HUE_RANGE;
        px[1] = to_u8(f32::from(px[1]) * (1.0 + self.saturation));
        px[2] = to_u8(f32::from(px[2]) + self.lightness);
    }
}

/// Apply per-band corrections. Bands missing from the map are skipped, and
/// pixels outside every corrected band keep their original bytes.
pub fn apply_hsl(
    rgb: ColorBuffer,
    bands: &BTreeMap<HueBand, HslCorrection>,
    converter: &dyn ColorConverter,
) -> ColorBuffer {
    let active: Vec<(HueBand, HslCorrection)> = bands
        .iter()
        .filter(|(_, correction)| !correction.is_identity())
        .map(|(&band, &correction)| (band, correction))
        .collect();
    if active.is_empty() {
        return rgb;
    }

    let mut hsv = converter.rgb_to_hsv(&rgb);
    let mut touched = vec![false; hsv.pixels.len()];

    for (band, correction) in active {
        let mask = band.mask(&hsv);
        let mut hits = 0usize;
        for ((px, &selected), t) in hsv.pixels.iter_mut().zip(&mask).zip(touched.iter_mut()) {
            if selected {
                correction.apply(px);
                *t = true;
                hits += 1;
            }
        }
        tracing::trace!(band = band.name(), pixels = hits, "hue band corrected");
    }

    let converted = converter.hsv_to_rgb(&hsv);
    recombine(rgb, converted, &touched)
}
