//! Alpha guard: keeps the alpha plane out of every color operator.
//!
//! The plane is split off before the first stage and reattached after the
//! last, so its bytes never pass through a color-space conversion.

use crate::image::{ColorBuffer, ColorSpace, GradingImage};

/// Alpha plane held aside while the color channels are graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaPlane {
    width: u32,
    height: u32,
    values: Vec<u8>,
}

impl AlphaPlane {
    /// Split an RGBA image into its RGB color buffer and alpha plane.
    pub fn split(image: &GradingImage) -> (ColorBuffer, Self) {
        let mut rgb = Vec::with_capacity(image.pixels.len());
        let mut values = Vec::with_capacity(image.pixels.len());
        for &[r, g, b, a] in &image.pixels {
            rgb.push([r, g, b]);
            values.push(a);
        }
        let color = ColorBuffer {
            width: image.width,
            height: image.height,
            space: ColorSpace::Rgb,
            pixels: rgb,
        };
        let alpha = Self {
            width: image.width,
            height: image.height,
            values,
        };
        (color, alpha)
    }

    /// Reattach this plane to a graded RGB buffer.
    ///
    /// Stages preserve geometry, so the buffer always matches the plane it
    /// was split from.
    pub fn reattach(self, color: ColorBuffer) -> GradingImage {
        debug_assert_eq!(color.space, ColorSpace::Rgb);
        debug_assert_eq!((color.width, color.height), (self.width, self.height));

        let pixels = color
            .pixels
            .into_iter()
            .zip(self.values)
            .map(|([r, g, b], a)| [r, g, b, a])
            .collect();
        GradingImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Alpha values in row-major order.
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GradingImage {
        GradingImage {
            width: 2,
            height: 1,
            pixels: vec![[10, 20, 30, 0], [40, 50, 60, 128]],
        }
    }

    #[test]
    fn test_split_separates_channels() {
        let (color, alpha) = AlphaPlane::split(&sample());
        assert_eq!(color.pixels, vec![[10, 20, 30], [40, 50, 60]]);
        assert_eq!(alpha.values(), &[0, 128]);
    }

    #[test]
    fn test_reattach_restores_original() {
        let image = sample();
        let (color, alpha) = AlphaPlane::split(&image);
        assert_eq!(alpha.reattach(color), image);
    }

    #[test]
    fn test_reattach_keeps_alpha_over_new_color() {
        let (mut color, alpha) = AlphaPlane::split(&sample());
        color.pixels = vec![[255, 255, 255]; 2];
        let out = alpha.reattach(color);
        assert_eq!(out.pixels, vec![[255, 255, 255, 0], [255, 255, 255, 128]]);
    }
}
