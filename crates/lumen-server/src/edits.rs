//! Geometric and quick-look edits offered next to the grading pipeline.
//!
//! All edits work on RGBA buffers and keep alpha meaningful: regions that
//! have no source pixel (crop padding, rotation corners) come out fully
//! transparent.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::ServerError;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Crop to the bounding box of pixels with non-zero alpha. Images with no
/// visible pixel are returned unchanged.
pub fn trim(image: &RgbaImage) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    match bounds {
        Some((x0, y0, x1, y1)) => {
            imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
        }
        None => image.clone(),
    }
}

/// Lanczos3 resize to `width`, keeping the aspect ratio. The new height is
/// truncated toward zero.
pub fn resize(image: &RgbaImage, width: i64) -> Result<RgbaImage, ServerError> {
    if width <= 0 {
        return Err(ServerError::bad_request("a positive width must be provided"));
    }
    let new_width = u32::try_from(width)
        .map_err(|_| ServerError::bad_request(format!("width {width} is too large")))?;
    let (w, h) = image.dimensions();
    if w == 0 {
        return Err(ServerError::bad_request("cannot resize an empty image"));
    }
    let new_height = (f64::from(new_width) * f64::from(h) / f64::from(w)) as u32;
    if new_height == 0 {
        return Err(ServerError::bad_request(format!(
            "width {width} collapses the image height to zero"
        )));
    }
    Ok(imageops::resize(image, new_width, new_height, FilterType::Lanczos3))
}

/// Mirror left-right.
pub fn flip_horizontal(image: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(image)
}

/// Mirror top-bottom.
pub fn flip_vertical(image: &RgbaImage) -> RgbaImage {
    imageops::flip_vertical(image)
}

/// Cut a `width × height` box at `(x, y)`. The box may extend past the
/// image on any side; that area is transparent.
pub fn crop(
    image: &RgbaImage,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
) -> Result<RgbaImage, ServerError> {
    if width <= 0 || height <= 0 {
        return Err(ServerError::bad_request(format!(
            "crop box {width}x{height} must have a positive size"
        )));
    }
    let out_w = u32::try_from(width)
        .map_err(|_| ServerError::bad_request(format!("crop width {width} is too large")))?;
    let out_h = u32::try_from(height)
        .map_err(|_| ServerError::bad_request(format!("crop height {height} is too large")))?;
    let (src_w, src_h) = (i64::from(image.width()), i64::from(image.height()));

    Ok(RgbaImage::from_fn(out_w, out_h, |ox, oy| {
        let sx = x + i64::from(ox);
        let sy = y + i64::from(oy);
        if (0..src_w).contains(&sx) && (0..src_h).contains(&sy) {
            *image.get_pixel(sx as u32, sy as u32)
        } else {
            TRANSPARENT
        }
    }))
}

/// Rotate counter-clockwise by `degrees`, expanding the canvas to hold the
/// whole result. Sampling is nearest-neighbour; uncovered corners are
/// transparent.
pub fn rotate(image: &RgbaImage, degrees: f64) -> Result<RgbaImage, ServerError> {
    if !degrees.is_finite() {
        return Err(ServerError::bad_request(format!("angle {degrees} is not finite")));
    }
    let degrees = degrees.rem_euclid(360.0);
    // Quarter turns are exact transposes.
    if degrees == 0.0 {
        return Ok(image.clone());
    } else if degrees == 90.0 {
        return Ok(imageops::rotate270(image));
    } else if degrees == 180.0 {
        return Ok(imageops::rotate180(image));
    } else if degrees == 270.0 {
        return Ok(imageops::rotate90(image));
    }

    let (w, h) = (f64::from(image.width()), f64::from(image.height()));
    let theta = -degrees.to_radians();
    let (cos, sin) = (snap(theta.cos()), snap(theta.sin()));

    // Output-to-source affine map: [a b c; d e f].
    let (a, b, d, e) = (cos, sin, -sin, cos);
    let apply = |x: f64, y: f64, c: f64, f: f64| (a * x + b * y + c, d * x + e * y + f);

    let (cx, cy) = (w / 2.0, h / 2.0);
    let (mut c, mut f) = apply(-cx, -cy, 0.0, 0.0);
    c += cx;
    f += cy;

    let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)].map(|(x, y)| apply(x, y, c, f));
    let (min_x, max_x) = min_max(corners.iter().map(|p| p.0));
    let (min_y, max_y) = min_max(corners.iter().map(|p| p.1));
    let new_w = max_x.ceil() - min_x.floor();
    let new_h = max_y.ceil() - min_y.floor();
    (c, f) = apply(-(new_w - w) / 2.0, -(new_h - h) / 2.0, c, f);

    let (src_w, src_h) = (image.width() as i64, image.height() as i64);
    Ok(RgbaImage::from_fn(new_w as u32, new_h as u32, |ox, oy| {
        let (sx, sy) = apply(f64::from(ox) + 0.5, f64::from(oy) + 0.5, c, f);
        let (ix, iy) = (sx.floor() as i64, sy.floor() as i64);
        if (0..src_w).contains(&ix) && (0..src_h).contains(&iy) {
            *image.get_pixel(ix as u32, iy as u32)
        } else {
            TRANSPARENT
        }
    }))
}

/// Drop floating-point noise near exact values.
fn snap(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Blend each pixel with its own luma: `0` is grayscale, `1` is identity,
/// above `1` oversaturates. Alpha is untouched.
pub fn adjust_saturation(image: &RgbaImage, factor: f64) -> Result<RgbaImage, ServerError> {
    if !factor.is_finite() {
        return Err(ServerError::bad_request(format!("factor {factor} is not finite")));
    }
    let factor = factor as f32;
    let mut out = image.clone();
    for px in out.pixels_mut() {
        let [r, g, b, _] = px.0;
        let luma = luma(r, g, b);
        for c in &mut px.0[..3] {
            let v = luma + factor * (f32::from(*c) - luma);
            *c = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

/// ITU-R 601 luma in fixed point, rounded to a byte.
fn luma(r: u8, g: u8, b: u8) -> f32 {
    let l = (u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16;
    l as f32
}
