//! Pixel-wise Euclidean distance between grayscale images.

use super::normalized::NormalizedImage;
use image::GrayImage;

/// Distance between two grayscale images.
///
/// Both images are normalized to `[0, 1]` and compared over their shared
/// top-left region. Images of different sizes are cropped, never resized.
/// Returns `0.0` when the region is empty.
pub fn distance(reference: &GrayImage, candidate: &GrayImage) -> f64 {
    NormalizedImage::from_gray(reference).distance(&NormalizedImage::from_gray(candidate))
}

/// Compares many candidates against one reference image.
///
/// Normalizes the reference once up front; each call to
/// [`Comparator::distance_to`] returns exactly what [`distance`] would.
#[derive(Debug, Clone)]
pub struct Comparator {
    reference: NormalizedImage,
}

impl Comparator {
    /// Create a comparator for the given reference image
    pub fn new(reference: &GrayImage) -> Self {
        Self {
            reference: NormalizedImage::from_gray(reference),
        }
    }

    /// Distance from the reference to `candidate`
    pub fn distance_to(&self, candidate: &GrayImage) -> f64 {
        self.reference.distance(&NormalizedImage::from_gray(candidate))
    }

    /// The normalized reference
    pub fn reference(&self) -> &NormalizedImage {
        &self.reference
    }
}
