//! Lumen Core: domain layer for 8-bit photo grading.
//!
//! This crate contains the color-space converters, the grading operators,
//! the alpha guard and the fixed-order pipeline that chains them. No I/O,
//! transport or framework dependencies.

pub mod alpha;
pub mod color;
pub mod error;
pub mod grading;
pub mod image;
pub mod transform;

// Re-exports for convenience.
pub use alpha::AlphaPlane;
pub use color::{ColorConverter, ParallelConverter, ScalarConverter};
pub use error::GradeError;
pub use crate::image::{ColorBuffer, ColorSpace, GradingImage};
pub use transform::evaluate::{GradingPipeline, grade};
pub use transform::lut::Lut1D;
pub use transform::params::{Adjustment, AdjustmentSet, HslCorrection, HueBand, Stage};
