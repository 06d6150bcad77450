//! Image representation for the grading pipeline.

use std::fmt;

use crate::error::GradeError;

/// Working color space of a [`ColorBuffer`]. Every space stores three
/// 8-bit channels in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Gamma-encoded sRGB, channel order R, G, B.
    Rgb,
    /// Hue in `[0, 180)` (half degrees), saturation and value in `[0, 255]`.
    Hsv,
    /// CIE L*a*b* (D65) packed as `L·255/100`, `a + 128`, `b + 128`.
    Lab,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "RGB"),
            Self::Hsv => write!(f, "HSV"),
            Self::Lab => write!(f, "LAB"),
        }
    }
}

/// Image as supplied by and returned to the caller: RGBA, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Row-major pixel data, `[R, G, B, A]`.
    pub pixels: Vec<[u8; 4]>,
}

impl GradingImage {
    /// Build an image from tightly packed RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, GradeError> {
        let expected = pixel_count(width, height) * 4;
        if data.len() != expected {
            return Err(GradeError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice::<u8, [u8; 4]>(&data).to_vec(),
        })
    }

    /// Build a wholly opaque image from tightly packed RGB bytes.
    ///
    /// This is the only case where alpha is synthesised: every pixel gets 255.
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> Result<Self, GradeError> {
        let expected = pixel_count(width, height) * 3;
        if data.len() != expected {
            return Err(GradeError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2], 255])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Check that the pixel vector matches the declared dimensions.
    pub fn validate(&self) -> Result<(), GradeError> {
        let expected = pixel_count(self.width, self.height);
        if self.pixels.len() != expected {
            return Err(GradeError::DimensionMismatch {
                width: self.width,
                height: self.height,
                expected: expected * 4,
                actual: self.pixels.len() * 4,
            });
        }
        Ok(())
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to an `image` crate buffer for encoding.
    pub fn to_rgba_image(&self) -> ::image::RgbaImage {
        let width = self.width;
        ::image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            ::image::Rgba(self.pixels[(y * width + x) as usize])
        })
    }
}

impl From<::image::RgbaImage> for GradingImage {
    fn from(img: ::image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl From<&::image::DynamicImage> for GradingImage {
    /// Sources without an alpha channel come out fully opaque.
    fn from(img: &::image::DynamicImage) -> Self {
        Self::from(img.to_rgba8())
    }
}

/// Three color channels in one working space, alpha held elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    pub width: u32,
    pub height: u32,
    /// Space the channel triples are expressed in.
    pub space: ColorSpace,
    pub pixels: Vec<[u8; 3]>,
}

impl ColorBuffer {
    /// A buffer filled with one RGB color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            width,
            height,
            space: ColorSpace::Rgb,
            pixels: vec![rgb; pixel_count(width, height)],
        }
    }

    /// Same geometry, new pixels in `space`.
    pub(crate) fn with_pixels(&self, space: ColorSpace, pixels: Vec<[u8; 3]>) -> Self {
        Self {
            width: self.width,
            height: self.height,
            space,
            pixels,
        }
    }

    /// Pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[(y * self.width + x) as usize]
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Round to nearest and saturate into a channel byte.
#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
