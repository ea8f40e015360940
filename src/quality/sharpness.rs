//! Fourier transform based sharpness
//!
//! De and Masilamani, 2013, "Image Sharpness Measure for Blurred Images in
//! Frequency Domain" (doi:10.1016/j.proeng.2013.09.086). Sharp images carry
//! more energy at high frequencies, so more of the spectrum stays above a
//! fixed fraction of its peak.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::errors::{PrepError, PrepResult};

use super::plane::Plane;
use super::QualityMetric;

/// Frequency components above `max / SHARPNESS_THRESHOLD_DIVISOR` count
pub const SHARPNESS_THRESHOLD_DIVISOR: f64 = 1000.0;

/// The Fourier sharpness measure as a `QualityMetric`
#[derive(Debug, Default, Clone, Copy)]
pub struct FourierSharpness;

impl QualityMetric for FourierSharpness {
    fn name(&self) -> &'static str {
        "sharpness"
    }

    fn score(&self, plane: &Plane) -> PrepResult<f64> {
        fourier_sharpness(plane)
    }
}

/// Fraction of frequency components above a thousandth of the peak
///
/// The spectrum is not shifted to centre the origin: the count does not
/// depend on where components sit.
pub fn fourier_sharpness(plane: &Plane) -> PrepResult<f64> {
    if plane.is_empty() {
        return Err(PrepError::GenericError(
            "Cannot compute sharpness of an empty plane".to_string(),
        ));
    }

    let magnitudes: Vec<f64> = fft2(plane).iter().map(|c| c.norm()).collect();
    let max = magnitudes.iter().cloned().fold(0.0_f64, f64::max);
    let threshold = max / SHARPNESS_THRESHOLD_DIVISOR;

    let above = magnitudes.iter().filter(|&&m| m > threshold).count();
    Ok(above as f64 / plane.area() as f64)
}

/// Two-dimensional forward FFT, rows then columns
fn fft2(plane: &Plane) -> Vec<Complex<f64>> {
    let (width, height) = (plane.width, plane.height);
    let mut buffer: Vec<Complex<f64>> = plane.data.iter().map(|&v| Complex::new(v, 0.0)).collect();

    let mut planner = FftPlanner::<f64>::new();

    let row_fft = planner.plan_fft_forward(width);
    for row in buffer.chunks_exact_mut(width) {
        row_fft.process(row);
    }

    let column_fft = planner.plan_fft_forward(height);
    let mut column = vec![Complex::new(0.0, 0.0); height];
    for x in 0..width {
        for y in 0..height {
            column[y] = buffer[y * width + x];
        }
        column_fft.process(&mut column);
        for y in 0..height {
            buffer[y * width + x] = column[y];
        }
    }

    buffer
}
