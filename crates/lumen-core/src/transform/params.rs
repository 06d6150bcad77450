//! Adjustment definitions: the closed set of grading stages and their
//! parameters.
//!
//! `AdjustmentSet` is the single source of truth for one grading call.
//! Values are validated when they enter the set, so the pipeline never sees
//! a parameter its formula cannot evaluate.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::GradeError;
use crate::grading::tone::{CONTRAST_LIMIT, EXPOSURE_LIMIT};

pub use crate::grading::hsl::{HslCorrection, HueBand};

/// Grading stages in canonical application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Exposure,
    Temperature,
    BrightnessContrast,
    Highlights,
    Shadows,
    Clarity,
    Vibrance,
    Saturation,
    Hsl,
}

impl Stage {
    /// The fixed order stages run in. Not caller-controllable.
    pub const CANONICAL: [Stage; 9] = [
        Stage::Exposure,
        Stage::Temperature,
        Stage::BrightnessContrast,
        Stage::Highlights,
        Stage::Shadows,
        Stage::Clarity,
        Stage::Vibrance,
        Stage::Saturation,
        Stage::Hsl,
    ];

    /// Human-readable label for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exposure => "exposure",
            Self::Temperature => "temperature",
            Self::BrightnessContrast => "brightness/contrast",
            Self::Highlights => "highlights",
            Self::Shadows => "shadows",
            Self::Clarity => "clarity",
            Self::Vibrance => "vibrance",
            Self::Saturation => "saturation",
            Self::Hsl => "hsl",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One grading stage together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    /// Exposure, roughly `[-100, 100]`; must stay below 125.
    Exposure(f32),
    /// Red/blue temperature shift. Positive warms.
    Temperature(f32),
    /// Brightness offset and contrast amount, applied in that order.
    /// A zero component is skipped; contrast must stay below 131.
    BrightnessContrast { brightness: f32, contrast: f32 },
    /// Highlight recovery/boost in percent.
    Highlights(f32),
    /// Shadow lift in percent.
    Shadows(f32),
    /// Local contrast in percent.
    Clarity(f32),
    /// Selective saturation boost in percent.
    Vibrance(f32),
    /// Uniform saturation change in percent.
    Saturation(f32),
    /// Per-hue-band corrections.
    Hsl(BTreeMap<HueBand, HslCorrection>),
}

impl Adjustment {
    /// Brightness on its own.
    pub fn brightness(brightness: f32) -> Self {
        Self::BrightnessContrast {
            brightness,
            contrast: 0.0,
        }
    }

    /// Contrast on its own.
    pub fn contrast(contrast: f32) -> Self {
        Self::BrightnessContrast {
            brightness: 0.0,
            contrast,
        }
    }

    /// Stage this adjustment runs in.
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Exposure(_) => Stage::Exposure,
            Self::Temperature(_) => Stage::Temperature,
            Self::BrightnessContrast { .. } => Stage::BrightnessContrast,
            Self::Highlights(_) => Stage::Highlights,
            Self::Shadows(_) => Stage::Shadows,
            Self::Clarity(_) => Stage::Clarity,
            Self::Vibrance(_) => Stage::Vibrance,
            Self::Saturation(_) => Stage::Saturation,
            Self::Hsl(_) => Stage::Hsl,
        }
    }

    /// Reject values the stage formula cannot evaluate.
    pub fn validate(&self) -> Result<(), GradeError> {
        match self {
            Self::Exposure(e) => {
                finite("exposure", *e)?;
                if *e >= EXPOSURE_LIMIT {
                    return Err(GradeError::invalid(
                        "exposure",
                        format!("{e} would make gamma non-positive (must be below {EXPOSURE_LIMIT})"),
                    ));
                }
            }
            Self::BrightnessContrast {
                brightness,
                contrast,
            } => {
                finite("brightness", *brightness)?;
                finite("contrast", *contrast)?;
                if *contrast >= CONTRAST_LIMIT {
                    return Err(GradeError::invalid(
                        "contrast",
                        format!("{contrast} would make the contrast denominator non-positive (must be below {CONTRAST_LIMIT})"),
                    ));
                }
            }
            Self::Temperature(v) => finite("temperature", *v)?,
            Self::Highlights(v) => finite("highlights", *v)?,
            Self::Shadows(v) => finite("shadows", *v)?,
            Self::Clarity(v) => finite("clarity", *v)?,
            Self::Vibrance(v) => finite("vibrance", *v)?,
            Self::Saturation(v) => finite("saturation", *v)?,
            Self::Hsl(bands) => {
                for (band, correction) in bands {
                    finite(&format!("hsl.{band}.h"), correction.hue)?;
                    finite(&format!("hsl.{band}.s"), correction.saturation)?;
                    finite(&format!("hsl.{band}.l"), correction.lightness)?;
                }
            }
        }
        Ok(())
    }
}

fn finite(name: &str, value: f32) -> Result<(), GradeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GradeError::invalid(name, format!("{value} is not a finite number")))
    }
}

/// Known top-level keys of an adjustment mapping.
const KNOWN_KEYS: [&str; 10] = [
    "exposure",
    "temperature",
    "brightness",
    "contrast",
    "highlights",
    "shadows",
    "clarity",
    "vibrance",
    "saturation",
    "hsl",
];

/// A sparse, validated set of adjustments, at most one per stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentSet {
    stages: [Option<Adjustment>; 9],
}

impl AdjustmentSet {
    /// Empty set. Grading with it is an identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, adjustment: Adjustment) -> Result<Self, GradeError> {
        self.insert(adjustment)?;
        Ok(self)
    }

    /// Validate and store an adjustment, replacing any earlier one for the
    /// same stage.
    pub fn insert(&mut self, adjustment: Adjustment) -> Result<(), GradeError> {
        adjustment.validate()?;
        let idx = adjustment.stage().index();
        self.stages[idx] = Some(adjustment);
        Ok(())
    }

    /// Adjustment requested for `stage`, if any.
    pub fn get(&self, stage: Stage) -> Option<&Adjustment> {
        self.stages[stage.index()].as_ref()
    }

    /// Number of requested stages.
    pub fn len(&self) -> usize {
        self.stages.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Requested adjustments in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Adjustment> {
        Stage::CANONICAL.into_iter().filter_map(|stage| self.get(stage))
    }

    /// Parse a JSON adjustment mapping.
    ///
    /// Unknown keys (top-level or hue-band) are ignored and `null` counts as
    /// absent. Numbers may also be given as numeric strings.
    pub fn from_json(value: &Value) -> Result<Self, GradeError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Self::from_map(map),
            other => Err(GradeError::MalformedAdjustments(format!(
                "expected an object, got {}",
                kind(other)
            ))),
        }
    }

    /// Parse an already-unwrapped JSON object.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, GradeError> {
        for key in map.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            tracing::debug!(key = %key, "ignoring unknown adjustment");
        }

        let mut set = Self::new();
        let scalars: [(&str, fn(f32) -> Adjustment); 7] = [
            ("exposure", Adjustment::Exposure),
            ("temperature", Adjustment::Temperature),
            ("highlights", Adjustment::Highlights),
            ("shadows", Adjustment::Shadows),
            ("clarity", Adjustment::Clarity),
            ("vibrance", Adjustment::Vibrance),
            ("saturation", Adjustment::Saturation),
        ];
        for (key, make) in scalars {
            if let Some(v) = number_field(map, key)? {
                set.insert(make(v))?;
            }
        }

        let brightness = number_field(map, "brightness")?;
        let contrast = number_field(map, "contrast")?;
        if brightness.is_some() || contrast.is_some() {
            set.insert(Adjustment::BrightnessContrast {
                brightness: brightness.unwrap_or(0.0),
                contrast: contrast.unwrap_or(0.0),
            })?;
        }

        match map.get("hsl") {
            None | Some(Value::Null) => {}
            Some(Value::Object(bands)) => set.insert(Adjustment::Hsl(parse_bands(bands)?))?,
            Some(other) => {
                return Err(GradeError::MalformedAdjustments(format!(
                    "`hsl` must be an object, got {}",
                    kind(other)
                )));
            }
        }

        Ok(set)
    }
}

fn parse_bands(bands: &Map<String, Value>) -> Result<BTreeMap<HueBand, HslCorrection>, GradeError> {
    let mut out = BTreeMap::new();
    for (name, value) in bands {
        let Some(band) = HueBand::from_name(name) else {
            tracing::debug!(band = %name, "ignoring unknown hue band");
            continue;
        };
        let fields = match value {
            Value::Null => continue,
            Value::Object(fields) => fields,
            other => {
                return Err(GradeError::MalformedAdjustments(format!(
                    "hsl band `{name}` must be an object, got {}",
                    kind(other)
                )));
            }
        };
        let component = |short: &str, long: &str| -> Result<f32, GradeError> {
            let key = if fields.contains_key(short) { short } else { long };
            Ok(number_field(fields, key)
                .map_err(|e| rename_field(e, &format!("hsl.{name}.{short}")))?
                .unwrap_or(0.0))
        };
        let correction = HslCorrection {
            hue: component("h", "hue")?,
            saturation: component("s", "saturation")?,
            lightness: component("l", "lightness")?,
        };
        out.insert(band, correction);
    }
    Ok(out)
}

fn rename_field(err: GradeError, name: &str) -> GradeError {
    match err {
        GradeError::InvalidParameter { reason, .. } => GradeError::invalid(name, reason),
        other => other,
    }
}

/// Read an optional numeric field. `null` and missing are both `None`.
fn number_field(map: &Map<String, Value>, key: &str) -> Result<Option<f32>, GradeError> {
    let value = match map.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(number) = number else {
        return Err(GradeError::invalid(
            key,
            format!("expected a number, got {}", describe(value)),
        ));
    };
    let number = number as f32;
    finite(key, number)?;
    Ok(Some(number))
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        other => kind(other).to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
