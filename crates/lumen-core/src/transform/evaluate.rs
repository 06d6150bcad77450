//! Pipeline evaluation. Applies every requested stage to one image.
//!
//! Stages always run in [`Stage::CANONICAL`] order regardless of how the
//! adjustments were supplied:
//! 1. Exposure
//! 2. Temperature
//! 3. Brightness / contrast
//! 4. Highlights
//! 5. Shadows
//! 6. Clarity
//! 7. Vibrance
//! 8. Saturation
//! 9. Per-band HSL
//!
//! Alpha is split off before stage 1 and reattached after stage 9.

use std::time::Instant;

use crate::alpha::AlphaPlane;
use crate::color::{ColorConverter, ScalarConverter};
use crate::error::GradeError;
use crate::grading::{clarity, hsl, lightness, saturation, temperature, tone};
use crate::image::{ColorBuffer, GradingImage};
use crate::transform::params::{Adjustment, AdjustmentSet, Stage};

/// Fixed-order grading pipeline, generic over the pixel-loop strategy.
#[derive(Debug, Clone, Default)]
pub struct GradingPipeline<C = ScalarConverter> {
    converter: C,
}

impl<C: ColorConverter> GradingPipeline<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Grade `image` with `adjustments`.
    ///
    /// Returns a new image of identical dimensions; the input is never
    /// modified. An empty set returns an exact copy.
    pub fn apply(
        &self,
        image: &GradingImage,
        adjustments: &AdjustmentSet,
    ) -> Result<GradingImage, GradeError> {
        image.validate()?;
        if adjustments.is_empty() {
            return Ok(image.clone());
        }

        let started = Instant::now();
        let (mut rgb, alpha) = AlphaPlane::split(image);
        for stage in Stage::CANONICAL {
            let Some(adjustment) = adjustments.get(stage) else {
                continue;
            };
            let stage_started = Instant::now();
            rgb = self.apply_stage(rgb, adjustment);
            tracing::debug!(
                stage = stage.label(),
                elapsed_us = stage_started.elapsed().as_micros() as u64,
                "stage applied"
            );
        }

        tracing::debug!(
            width = image.width,
            height = image.height,
            stages = adjustments.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "image graded"
        );
        Ok(alpha.reattach(rgb))
    }

    fn apply_stage(&self, rgb: ColorBuffer, adjustment: &Adjustment) -> ColorBuffer {
        let converter: &dyn ColorConverter = &self.converter;
        match *adjustment {
            Adjustment::Exposure(e) => tone::apply_exposure(rgb, e),
            Adjustment::Temperature(t) => temperature::apply_temperature(rgb, t),
            Adjustment::BrightnessContrast {
                brightness,
                contrast,
            } => tone::apply_brightness_contrast(rgb, brightness, contrast),
            Adjustment::Highlights(h) => lightness::apply_highlights(rgb, h, converter),
            Adjustment::Shadows(s) => lightness::apply_shadows(rgb, s, converter),
            Adjustment::Clarity(c) => clarity::apply_clarity(rgb, c),
            Adjustment::Vibrance(v) => saturation::apply_vibrance(rgb, v, converter),
            Adjustment::Saturation(s) => saturation::apply_saturation(rgb, s, converter),
            Adjustment::Hsl(ref bands) => hsl::apply_hsl(rgb, bands, converter),
        }
    }
}

/// Grade with the default single-threaded pipeline.
pub fn grade(image: &GradingImage, adjustments: &AdjustmentSet) -> Result<GradingImage, GradeError> {
    GradingPipeline::<ScalarConverter>::default().apply(image, adjustments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ParallelConverter;
    use serde_json::json;

    fn gradient(width: u32, height: u32) -> GradingImage {
        let pixels = (0..width * height)
            .map(|i| {
                let x = (i % width) as u8;
                let y = (i / width) as u8;
                [x.wrapping_mul(37), y.wrapping_mul(53), x ^ y, (i % 256) as u8]
            })
            .collect();
        GradingImage {
            width,
            height,
            pixels,
        }
    }

    fn adjustments(value: serde_json::Value) -> AdjustmentSet {
        AdjustmentSet::from_json(&value).unwrap()
    }

    #[test]
    fn test_empty_set_is_identity() {
        let image = gradient(9, 7);
        assert_eq!(grade(&image, &AdjustmentSet::new()).unwrap(), image);
    }

    #[test]
    fn test_rejects_inconsistent_image() {
        let image = GradingImage {
            width: 3,
            height: 3,
            pixels: vec![[0; 4]; 8],
        };
        let err = grade(&image, &adjustments(json!({ "exposure": 10 }))).unwrap_err();
        assert!(matches!(err, GradeError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_alpha_survives_every_stage() {
        let image = gradient(16, 12);
        let set = adjustments(json!({
            "exposure": 20, "temperature": -15, "brightness": 10, "contrast": 25,
            "highlights": -30, "shadows": 40, "clarity": 50, "vibrance": 35,
            "saturation": -20, "hsl": { "green": { "h": 30, "s": 20, "l": -10 } },
        }));
        let out = grade(&image, &set).unwrap();
        assert_eq!((out.width, out.height), (image.width, image.height));
        for (a, b) in out.pixels.iter().zip(&image.pixels) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_single_stage_matches_operator() {
        let image = gradient(5, 5);
        let out = grade(&image, &adjustments(json!({ "temperature": 30 }))).unwrap();
        let (rgb, _) = AlphaPlane::split(&image);
        let expected = temperature::apply_temperature(rgb, 30.0);
        for (px, rgb) in out.pixels.iter().zip(&expected.pixels) {
            assert_eq!(&px[..3], &rgb[..]);
        }
    }

    #[test]
    fn test_parallel_matches_scalar() {
        let image = gradient(33, 21);
        let set = adjustments(json!({
            "highlights": 25, "vibrance": 40, "hsl": { "red": { "s": -50 } },
        }));
        let scalar = GradingPipeline::new(ScalarConverter).apply(&image, &set).unwrap();
        let parallel = GradingPipeline::new(ParallelConverter).apply(&image, &set).unwrap();
        assert_eq!(scalar, parallel);
    }
}
