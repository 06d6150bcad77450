//! Request dispatch: decode, run the requested operation, encode.

use image::RgbaImage;
use lumen_core::{AdjustmentSet, GradingImage, GradingPipeline, ParallelConverter, ScalarConverter};

use crate::data_url;
use crate::edits;
use crate::error::ServerError;
use crate::protocol::{Command, Request, Response};

/// Converter choice for grading requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Scalar,
    Parallel,
}

impl Backend {
    pub fn from_flag(parallel: bool) -> Self {
        if parallel { Self::Parallel } else { Self::Scalar }
    }
}

/// Turn one text frame into one reply. Never fails: errors become `error`
/// replies.
pub fn handle_text(text: &str, backend: Backend) -> Response {
    match Request::parse(text) {
        Ok(request) => handle_request(request, backend),
        Err((id, err)) => {
            tracing::warn!(?id, "rejected request: {err}");
            Response::error(id, &err)
        }
    }
}

/// Run a parsed request.
pub fn handle_request(request: Request, backend: Backend) -> Response {
    let Request { id, command } = request;
    let name = command.name();
    match execute(&command, backend) {
        Ok(image) => {
            let (width, height) = image.dimensions();
            match data_url::encode_png(&image) {
                Ok(url) => {
                    tracing::info!(?id, command = name, width, height, "request completed");
                    Response::image(id, url, width, height)
                }
                Err(err) => {
                    tracing::error!(?id, command = name, "failed to encode result: {err}");
                    Response::error(id, &err)
                }
            }
        }
        Err(err) => {
            tracing::warn!(?id, command = name, "request failed: {err}");
            Response::error(id, &err)
        }
    }
}

/// Decode the carried image and apply the command to it.
pub fn execute(command: &Command, backend: Backend) -> Result<RgbaImage, ServerError> {
    let source = data_url::decode(command.image_data())?;
    match command {
        Command::Grade(payload) => {
            let adjustments = AdjustmentSet::from_json(&payload.adjustments)?;
            grade(source, &adjustments, backend)
        }
        Command::Trim(_) => Ok(edits::trim(&source)),
        Command::Resize(p) => edits::resize(&source, p.width),
        Command::Flip(_) => Ok(edits::flip_horizontal(&source)),
        Command::FlipVertical(_) => Ok(edits::flip_vertical(&source)),
        Command::Crop(p) => edits::crop(&source, p.x, p.y, p.width, p.height),
        Command::Rotate(p) => edits::rotate(&source, p.angle),
        Command::AdjustSaturation(p) => edits::adjust_saturation(&source, p.factor),
    }
}

fn grade(
    source: RgbaImage,
    adjustments: &AdjustmentSet,
    backend: Backend,
) -> Result<RgbaImage, ServerError> {
    let image = GradingImage::from(source);
    let graded = match backend {
        Backend::Scalar => GradingPipeline::new(ScalarConverter).apply(&image, adjustments)?,
        Backend::Parallel => GradingPipeline::new(ParallelConverter).apply(&image, adjustments)?,
    };
    Ok(graded.to_rgba_image())
}
