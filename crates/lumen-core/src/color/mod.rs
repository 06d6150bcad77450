//! Color-space conversion over whole buffers.
//!
//! Operators only see the [`ColorConverter`] trait, so the per-pixel loop can
//! be swapped (scalar vs. row-parallel) without touching grading logic.

pub mod hsv;
pub mod lab;

use rayon::prelude::*;

use crate::image::{ColorBuffer, ColorSpace};

/// Full-buffer conversions between RGB and the operator working spaces.
///
/// Implementations must be bit-identical to each other.
pub trait ColorConverter: Send + Sync {
    /// Map every pixel through `f`, tagging the result with `space`.
    fn map_pixels(
        &self,
        buffer: &ColorBuffer,
        space: ColorSpace,
        f: fn([u8; 3]) -> [u8; 3],
    ) -> ColorBuffer;

    fn rgb_to_hsv(&self, buffer: &ColorBuffer) -> ColorBuffer {
        debug_assert_eq!(buffer.space, ColorSpace::Rgb);
        self.map_pixels(buffer, ColorSpace::Hsv, hsv::rgb_to_hsv)
    }

    fn hsv_to_rgb(&self, buffer: &ColorBuffer) -> ColorBuffer {
        debug_assert_eq!(buffer.space, ColorSpace::Hsv);
        self.map_pixels(buffer, ColorSpace::Rgb, hsv::hsv_to_rgb)
    }

    fn rgb_to_lab(&self, buffer: &ColorBuffer) -> ColorBuffer {
        debug_assert_eq!(buffer.space, ColorSpace::Rgb);
        self.map_pixels(buffer, ColorSpace::Lab, lab::rgb_to_lab)
    }

    fn lab_to_rgb(&self, buffer: &ColorBuffer) -> ColorBuffer {
        debug_assert_eq!(buffer.space, ColorSpace::Lab);
        self.map_pixels(buffer, ColorSpace::Rgb, lab::lab_to_rgb)
    }
}

/// Single-threaded pixel loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarConverter;

impl ColorConverter for ScalarConverter {
    fn map_pixels(
        &self,
        buffer: &ColorBuffer,
        space: ColorSpace,
        f: fn([u8; 3]) -> [u8; 3],
    ) -> ColorBuffer {
        let pixels = buffer.pixels.iter().map(|&px| f(px)).collect();
        buffer.with_pixels(space, pixels)
    }
}

/// Splits rows across the rayon global pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelConverter;

impl ColorConverter for ParallelConverter {
    fn map_pixels(
        &self,
        buffer: &ColorBuffer,
        space: ColorSpace,
        f: fn([u8; 3]) -> [u8; 3],
    ) -> ColorBuffer {
        let row_len = (buffer.width as usize).max(1);
        let pixels = buffer
            .pixels
            .par_chunks(row_len)
            .flat_map_iter(|row| row.iter().map(move |&px| f(px)))
            .collect();
        buffer.with_pixels(space, pixels)
    }
}
