//! Image quality metrics
//!
//! Scores single image planes, e.g. to spot out-of-focus tiles before
//! running the pipeline.

mod plane;
mod sharpness;
#[cfg(test)]
mod tests;

pub use plane::Plane;
pub use sharpness::{fourier_sharpness, FourierSharpness, SHARPNESS_THRESHOLD_DIVISOR};

use crate::errors::PrepResult;

/// A metric computed over one image plane
pub trait QualityMetric {
    /// Short name used as a column header
    fn name(&self) -> &'static str;

    /// Score a plane
    fn score(&self, plane: &Plane) -> PrepResult<f64>;
}
