//! Grayscale images rescaled to the unit interval.

use image::GrayImage;

/// Largest value an 8-bit sample can hold
const MAX_INTENSITY: f64 = 255.0;

/// A grayscale image with every sample divided by 255.
///
/// Always built as a fresh value from a [`GrayImage`]; the source is
/// never touched. Width and height match the source exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    width: u32,
    height: u32,
    /// Row-major samples in `[0.0, 1.0]`
    samples: Vec<f64>,
}

impl NormalizedImage {
    /// Normalize an 8-bit grayscale image
    pub fn from_gray(image: &GrayImage) -> Self {
        let samples = image
            .as_raw()
            .iter()
            .map(|&value| value as f64 / MAX_INTENSITY)
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.samples[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Euclidean distance over the top-left region both images share.
    ///
    /// The region is `min(height)` rows by `min(width)` columns. If either
    /// image is empty the region is empty and the distance is `0.0`.
    pub fn distance(&self, other: &NormalizedImage) -> f64 {
        let rows = self.height.min(other.height);
        let cols = self.width.min(other.width);

        let mut sum = 0.0;
        for y in 0..rows {
            for x in 0..cols {
                let diff = self.get(x, y) - other.get(x, y);
                sum += diff * diff;
            }
        }

        sum.sqrt()
    }
}

impl From<&GrayImage> for NormalizedImage {
    fn from(image: &GrayImage) -> Self {
        Self::from_gray(image)
    }
}
