//! Tests for image quality metrics

extern crate std;

use image::{DynamicImage, ImageBuffer, Luma};

use crate::quality::{fourier_sharpness, FourierSharpness, Plane, QualityMetric};

/// Deterministic noise in 0..65535
fn noise_plane(width: usize, height: usize) -> Plane {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let data = (0..width * height)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 65536) as f64
        })
        .collect();
    Plane::new(width, height, data).unwrap()
}

/// A wide Gaussian spot, i.e. a heavily blurred image
fn smooth_plane(width: usize, height: usize) -> Plane {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let sigma = width as f64 / 8.0;
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let d2 = (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2);
            data.push(1000.0 * (-d2 / (2.0 * sigma * sigma)).exp());
        }
    }
    Plane::new(width, height, data).unwrap()
}

#[test]
fn test_constant_plane_has_only_dc_component() {
    let plane = Plane::new(8, 8, vec![5.0; 64]).unwrap();
    let sharpness = fourier_sharpness(&plane).unwrap();
    std::assert!((sharpness - 1.0 / 64.0).abs() < 1e-12);
}

#[test]
fn test_zero_plane_scores_zero() {
    let plane = Plane::new(4, 3, vec![0.0; 12]).unwrap();
    std::assert_eq!(fourier_sharpness(&plane).unwrap(), 0.0);
}

#[test]
fn test_noise_is_sharper_than_blur() {
    let noise = fourier_sharpness(&noise_plane(32, 32)).unwrap();
    let smooth = fourier_sharpness(&smooth_plane(32, 32)).unwrap();

    std::assert!(noise > 0.5, "noise sharpness {}", noise);
    std::assert!(smooth < 0.25, "smooth sharpness {}", smooth);
    std::assert!(noise <= 1.0);
}

#[test]
fn test_empty_plane_is_an_error() {
    let plane = Plane::new(0, 0, Vec::new()).unwrap();
    std::assert!(fourier_sharpness(&plane).is_err());
}

#[test]
fn test_plane_size_mismatch() {
    std::assert!(Plane::new(2, 2, vec![0.0; 3]).is_err());
}

#[test]
fn test_metric_trait() {
    let metric = FourierSharpness;
    std::assert_eq!(metric.name(), "sharpness");
    let plane = Plane::new(1, 1, vec![7.0]).unwrap();
    std::assert_eq!(metric.score(&plane).unwrap(), 1.0);
}

#[test]
fn test_plane_from_16_bit_image() {
    let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(3, 2, |x, y| Luma([(y * 3 + x) as u16 * 1000]));
    let plane = Plane::from_image(&DynamicImage::ImageLuma16(buffer));

    std::assert_eq!(plane.width, 3);
    std::assert_eq!(plane.height, 2);
    std::assert_eq!(plane.data, vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0]);
}

#[test]
fn test_plane_load_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("1_00001_Z001_CH1.tif");

    let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(4, 4, |x, y| Luma([((x + y) * 100) as u16]));
    buffer.save(&path).unwrap();

    let plane = Plane::load(&path).unwrap();
    std::assert_eq!(plane.area(), 16);
    std::assert_eq!(plane.data[5], 200.0);
}
