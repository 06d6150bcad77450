//! `data:` URL codec for images carried inside JSON messages.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::error::ServerError;

/// Decode a `data:image/<fmt>;base64,<payload>` URL into RGBA.
///
/// The header is only used to locate the payload; the format is sniffed from
/// the bytes. Sources without alpha come out fully opaque.
pub fn decode(url: &str) -> Result<RgbaImage, ServerError> {
    let (_, payload) = url
        .split_once(',')
        .ok_or(ServerError::MalformedDataUrl("missing ',' separator"))?;
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(ServerError::MalformedDataUrl("empty payload"));
    }
    let bytes = STANDARD.decode(payload)?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgba8())
}

/// Encode as a PNG `data:` URL.
pub fn encode_png(image: &RgbaImage) -> Result<String, ServerError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(buf.into_inner())))
}
