//! Clarity: unsharp-mask local contrast.
//!
//! ```text
//! blurred = gaussian(in, radius 5)
//! out     = in × (1 + c/100) − blurred × (c/100)
//! ```
//!
//! The kernel is `2r + 1` taps wide with σ derived from the tap count:
//! `σ = 0.3 × ((ksize − 1) / 2 − 1) + 0.8`, which gives σ = 2.0 for r = 5.
//! Borders reflect without repeating the edge pixel (`dcb|abcd|cba`).

use crate::image::{ColorBuffer, to_u8};

/// Blur radius used by clarity, in pixels.
pub const CLARITY_RADIUS: usize = 5;

/// σ for a kernel of `2·radius + 1` taps.
pub fn sigma_for_radius(radius: usize) -> f32 {
    let ksize = (2 * radius + 1) as f32;
    0.3 * ((ksize - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1D Gaussian kernel with `2·radius + 1` taps.
pub fn gaussian_kernel(radius: usize) -> Vec<f32> {
    let sigma = sigma_for_radius(radius);
    let mut kernel: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }
    kernel
}

/// Index into `0..len` reflecting about the edges without repeating them.
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let i = i.rem_euclid(period);
    if i >= len as isize {
        (period - i) as usize
    } else {
        i as usize
    }
}

/// Separable Gaussian blur of all three channels, rounded back to bytes.
pub fn gaussian_blur(rgb: &ColorBuffer, radius: usize) -> ColorBuffer {
    let width = rgb.width as usize;
    let height = rgb.height as usize;
    if width == 0 || height == 0 || radius == 0 {
        return rgb.clone();
    }

    let kernel = gaussian_kernel(radius);
    let half = radius as isize;

    // Horizontal pass
    let mut temp = vec![[0.0f32; 3]; width * height];
    for y in 0..height {
        let row = &rgb.pixels[y * width..(y + 1) * width];
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = reflect_101(x as isize + ki as isize - half, width);
                for c in 0..3 {
                    sum[c] += f32::from(row[sx][c]) * kv;
                }
            }
            temp[y * width + x] = sum;
        }
    }

    // Vertical pass
    let mut pixels = vec![[0u8; 3]; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + ki as isize - half, height);
                for c in 0..3 {
                    sum[c] += temp[sy * width + x][c] * kv;
                }
            }
            pixels[y * width + x] = [to_u8(sum[0]), to_u8(sum[1]), to_u8(sum[2])];
        }
    }

    rgb.with_pixels(rgb.space, pixels)
}

/// Apply clarity. Zero skips the blur entirely.
pub fn apply_clarity(mut rgb: ColorBuffer, amount: f32) -> ColorBuffer {
    if amount == 0.0 {
        return rgb;
    }
    let k = amount / 100.0;
    let blurred = gaussian_blur(&rgb, CLARITY_RADIUS);
    for (px, blur) in rgb.pixels.iter_mut().zip(&blurred.pixels) {
        for c in 0..3 {
            px[c] = to_u8(f32::from(px[c]) * (1.0 + k) - f32::from(blur[c]) * k);
        }
    }
    rgb
}
