//! 256-entry lookup tables for per-channel tone curves.

/// A 1D lookup table mapping every 8-bit input value to an output value.
///
/// Built once per operator call from a per-value formula, then applied to
/// any subset of channels without re-evaluating the formula per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut1D {
    table: [u8; 256],
}

impl Lut1D {
    /// Bake `f(input)` for every input in `0..=255`. Results are rounded
    /// and clamped into `[0, 255]`.
    pub fn from_fn(f: impl Fn(u8) -> f32) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = crate::image::to_u8(f(i as u8));
        }
        Self { table }
    }

    /// Look up a single value.
    #[inline]
    pub fn get(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// Apply this table to the given channel indices of every pixel.
    pub fn apply_channels(&self, pixels: &mut [[u8; 3]], channels: &[usize]) {
        for px in pixels.iter_mut() {
            for &c in channels {
                px[c] = self.get(px[c]);
            }
        }
    }
}
