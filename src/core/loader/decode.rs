//! Grayscale decoding with a fast path for JPEG.
//!
//! JPEG files are decoded by zune-jpeg, everything else by the image
//! crate. Both routes end in the same RGB to gray conversion
//! ([`rgb_to_gray`], BT.601 weights), so a picture gets the same gray
//! values whatever container it is stored in.

use crate::error::LoadError;
use image::{GrayImage, RgbImage};
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// BT.601 weights in 14-bit fixed point (sum is 1 << 14)
const WEIGHT_R: u32 = 4899;
const WEIGHT_G: u32 = 9617;
const WEIGHT_B: u32 = 1868;
const WEIGHT_SHIFT: u32 = 14;

/// Convert RGB to gray with `0.299 R + 0.587 G + 0.114 B`, rounded.
///
/// Gray inputs (R = G = B) come back unchanged.
pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let round = 1 << (WEIGHT_SHIFT - 1);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let weighted = r as u32 * WEIGHT_R + g as u32 * WEIGHT_G + b as u32 * WEIGHT_B;
        image::Luma([((weighted + round) >> WEIGHT_SHIFT) as u8])
    })
}

/// Decoder routing picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRoute {
    Jpeg,
    Generic,
}

impl DecodeRoute {
    /// Pick a route from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Generic,
        }
    }
}

/// Decodes image files into 8-bit grayscale
pub struct GrayDecoder;

impl GrayDecoder {
    /// Decode a file into a grayscale image.
    ///
    /// A JPEG that zune-jpeg rejects gets a second try through the image
    /// crate before the error is reported.
    pub fn decode(path: &Path) -> Result<GrayImage, LoadError> {
        match DecodeRoute::from_path(path) {
            DecodeRoute::Jpeg => Self::decode_jpeg(path).or_else(|_| Self::decode_generic(path)),
            DecodeRoute::Generic => Self::decode_generic(path),
        }
    }

    fn decode_jpeg(path: &Path) -> Result<GrayImage, LoadError> {
        let file_bytes = fs::read(path).map_err(|e| LoadError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

        let pixels = decoder.decode().map_err(|e| LoadError::DecodeError {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| LoadError::DecodeError {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;

        let buffer_error = || LoadError::DecodeError {
            path: path.to_path_buf(),
            reason: "decoded buffer does not match image size".to_string(),
        };

        // Grayscale JPEGs may come back as a single channel
        match decoder.get_output_colorspace() {
            Some(ColorSpace::RGB) => RgbImage::from_raw(width, height, pixels)
                .map(|rgb| rgb_to_gray(&rgb))
                .ok_or_else(buffer_error),
            Some(ColorSpace::Luma) => {
                GrayImage::from_raw(width, height, pixels).ok_or_else(buffer_error)
            }
            _ => Self::decode_generic(path),
        }
    }

    fn decode_generic(path: &Path) -> Result<GrayImage, LoadError> {
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => LoadError::IoError {
                path: path.to_path_buf(),
                source,
            },
            other => LoadError::DecodeError {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

        Ok(rgb_to_gray(&image.to_rgb8()))
    }
}
