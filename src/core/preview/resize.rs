//! SIMD-accelerated grayscale resizing for previews.
//!
//! Uses fast_image_resize, which picks AVX2/NEON when available.

use crate::error::PreviewError;
use fast_image_resize::{images::Image, PixelType, ResizeOptions, Resizer};
use image::GrayImage;

/// Largest size that fits inside `max_width` x `max_height` with the
/// source aspect ratio preserved.
///
/// Scales up as well as down. Neither side is ever reported as zero
/// unless the source itself is empty.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );

    let fitted_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let fitted_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);

    (fitted_width, fitted_height)
}

/// Reusable grayscale resizer
pub struct PreviewResizer {
    resizer: Resizer,
}

impl PreviewResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resize a grayscale image to exactly `width` x `height`
    pub fn resize(
        &mut self,
        image: &GrayImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, PreviewError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PreviewError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            });
        }

        if width == 0 || height == 0 {
            return Err(PreviewError::InvalidDimensions { width, height });
        }

        if image.dimensions() == (width, height) {
            return Ok(image.clone());
        }

        let src_image = Image::from_vec_u8(
            image.width(),
            image.height(),
            image.as_raw().clone(),
            PixelType::U8,
        )
        .map_err(|e| PreviewError::ResizeFailed(format!("source image: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Bilinear,
        ));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| PreviewError::ResizeFailed(e.to_string()))?;

        GrayImage::from_raw(width, height, dst_image.into_vec())
            .ok_or_else(|| PreviewError::ResizeFailed("result buffer size mismatch".to_string()))
    }

    /// Scale to fit a bounding box, keeping the aspect ratio
    pub fn fit(
        &mut self,
        image: &GrayImage,
        max_width: u32,
        max_height: u32,
    ) -> Result<GrayImage, PreviewError> {
        let (width, height) = fit_within(image.width(), image.height(), max_width, max_height);
        self.resize(image, width, height)
    }
}

impl Default for PreviewResizer {
    fn default() -> Self {
        Self::new()
    }
}
