//! Transform pipeline: adjustment definitions, orchestration and LUT operations.

pub mod evaluate;
pub mod lut;
pub mod params;
