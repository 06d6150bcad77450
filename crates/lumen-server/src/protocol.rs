//! Message contracts between WebSocket clients and the server.
//!
//! Requests and replies use the `#[serde(tag = "type", content = "data")]`
//! layout with an optional numeric `id` alongside, echoed back so clients
//! can match replies to requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServerError;

/// One decoded request frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: Option<u64>,
    pub command: Command,
}

impl Request {
    /// Parse a text frame. On failure the `id` (if it could be read) is
    /// returned with the error so the reply can still be correlated.
    pub fn parse(text: &str) -> Result<Self, (Option<u64>, ServerError)> {
        let value: Value = serde_json::from_str(text).map_err(|e| (None, e.into()))?;
        let id = value.get("id").and_then(Value::as_u64);
        let command = Command::deserialize(&value).map_err(|e| (id, e.into()))?;
        Ok(Self { id, command })
    }
}

/// Operations a client can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Command {
    /// Run the grading pipeline.
    Grade(GradePayload),
    /// Crop to the visible (non-transparent) pixels.
    Trim(ImagePayload),
    /// Lanczos resize to a width, keeping aspect.
    Resize(ResizePayload),
    /// Mirror left-right.
    Flip(ImagePayload),
    /// Mirror top-bottom.
    FlipVertical(ImagePayload),
    /// Cut a box; area outside the image is transparent.
    Crop(CropPayload),
    /// Counter-clockwise rotation with an expanded canvas.
    Rotate(RotatePayload),
    /// Single-factor saturation enhance.
    AdjustSaturation(SaturationPayload),
}

impl Command {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grade(_) => "grade",
            Self::Trim(_) => "trim",
            Self::Resize(_) => "resize",
            Self::Flip(_) => "flip",
            Self::FlipVertical(_) => "flipVertical",
            Self::Crop(_) => "crop",
            Self::Rotate(_) => "rotate",
            Self::AdjustSaturation(_) => "adjustSaturation",
        }
    }

    /// The image data URL every command carries.
    pub fn image_data(&self) -> &str {
        match self {
            Self::Grade(p) => &p.image_data,
            Self::Trim(p) | Self::Flip(p) | Self::FlipVertical(p) => &p.image_data,
            Self::Resize(p) => &p.image_data,
            Self::Crop(p) => &p.image_data,
            Self::Rotate(p) => &p.image_data,
            Self::AdjustSaturation(p) => &p.image_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub image_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradePayload {
    pub image_data: String,
    /// Sparse adjustment mapping; parsed by `AdjustmentSet::from_json`.
    #[serde(default)]
    pub adjustments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizePayload {
    pub image_data: String,
    #[serde(default)]
    pub width: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPayload {
    pub image_data: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatePayload {
    pub image_data: String,
    /// Degrees, counter-clockwise.
    #[serde(default)]
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationPayload {
    pub image_data: String,
    #[serde(default = "unit_factor")]
    pub factor: f64,
}

fn unit_factor() -> f64 {
    1.0
}

/// One reply frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub reply: Reply,
}

/// Reply body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Reply {
    /// The edited image as a PNG data URL.
    Image {
        #[serde(rename = "imageUrl")]
        image_url: String,
        width: u32,
        height: u32,
    },
    /// The request failed; nothing was produced.
    Error { message: String },
}

impl Response {
    pub fn image(id: Option<u64>, image_url: String, width: u32, height: u32) -> Self {
        Self {
            id,
            reply: Reply::Image {
                image_url,
                width,
                height,
            },
        }
    }

    pub fn error(id: Option<u64>, err: &ServerError) -> Self {
        Self {
            id,
            reply: Reply::Error {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_grade_request() {
        let text = json!({
            "id": 7,
            "type": "grade",
            "data": { "imageData": "data:image/png;base64,AAAA", "adjustments": { "exposure": 10 } },
        })
        .to_string();
        let req = Request::parse(&text).unwrap();
        assert_eq!(req.id, Some(7));
        let Command::Grade(payload) = &req.command else {
            panic!("expected grade, got {:?}", req.command);
        };
        assert_eq!(payload.adjustments, json!({ "exposure": 10 }));
        assert_eq!(req.command.image_data(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_parse_defaults() {
        let req = Request::parse(
            r#"{"type": "adjustSaturation", "data": {"imageData": "x,y"}}"#,
        )
        .unwrap();
        assert_eq!(req.id, None);
        assert_eq!(
            req.command,
            Command::AdjustSaturation(SaturationPayload {
                image_data: "x,y".into(),
                factor: 1.0
            })
        );

        let req = Request::parse(r#"{"type": "flipVertical", "data": {"imageData": "a,b"}}"#).unwrap();
        assert_eq!(req.command.name(), "flipVertical");
    }

    #[test]
    fn test_parse_errors_keep_id() {
        let (id, err) = Request::parse(r#"{"id": 3, "type": "sharpen", "data": {}}"#).unwrap_err();
        assert_eq!(id, Some(3));
        assert!(matches!(err, ServerError::Json(_)));

        let (id, _) = Request::parse("not json").unwrap_err();
        assert_eq!(id, None);
    }

    #[test]
    fn test_response_layout() {
        let ok = serde_json::to_value(Response::image(Some(1), "data:,".into(), 2, 3)).unwrap();
        assert_eq!(
            ok,
            json!({ "id": 1, "type": "image", "data": { "imageUrl": "data:,", "width": 2, "height": 3 } })
        );

        let err = Response::error(None, &ServerError::bad_request("boom"));
        let value = serde_json::to_value(err).unwrap();
        assert_eq!(value, json!({ "type": "error", "data": { "message": "invalid request: boom" } }));
    }
}
