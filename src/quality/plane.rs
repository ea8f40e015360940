//! Grayscale image planes

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::errors::{PrepError, PrepResult};

/// A single grayscale image plane in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl Plane {
    /// Create a plane from raw values
    ///
    /// # Arguments
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    /// * `data` - `width * height` values, row after row
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> PrepResult<Self> {
        if data.len() != width * height {
            return Err(PrepError::GenericError(format!(
                "Plane of {}x{} needs {} values, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }
        Ok(Plane { width, height, data })
    }

    /// Convert an image to a plane of 16-bit luminance values
    pub fn from_image(image: &DynamicImage) -> Self {
        let gray = image.to_luma16();
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let data = gray.into_raw().into_iter().map(f64::from).collect();

        Plane { width, height, data }
    }

    /// Load the first plane of an image file
    pub fn load<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)?;
        debug!(
            "Loaded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Ok(Self::from_image(&image))
    }

    /// Number of pixels
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether the plane has no pixels
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}
