//! # Preview Module
//!
//! Small renditions of the reference image and the winning candidate.
//!
//! Previews keep the aspect ratio and are bounded to a fixed display box
//! (200x200 by default). They can be drawn in the terminal as ASCII art or
//! written next to each other as PNG files.

mod ascii;
mod resize;

pub use ascii::{shade, AsciiRenderer};
pub use resize::{fit_within, PreviewResizer};

use crate::error::PreviewError;
use image::GrayImage;
use std::path::{Path, PathBuf};

/// Bounding box for previews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl PreviewConfig {
    /// Square bounding box
    pub fn square(size: u32) -> Self {
        Self {
            max_width: size,
            max_height: size,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::square(200)
    }
}

/// Build a preview bounded by `config`
pub fn make_preview(image: &GrayImage, config: &PreviewConfig) -> Result<GrayImage, PreviewError> {
    PreviewResizer::new().fit(image, config.max_width, config.max_height)
}

/// Write the reference and winner previews into `dir`.
///
/// Files are named `reference_<stem>.png` and `match_<stem>.png`. Returns
/// the two written paths.
pub fn save_previews(
    dir: &Path,
    reference: (&Path, &GrayImage),
    winner: (&Path, &GrayImage),
    config: &PreviewConfig,
) -> Result<(PathBuf, PathBuf), PreviewError> {
    std::fs::create_dir_all(dir).map_err(|e| PreviewError::SaveFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let reference_out = dir.join(preview_name("reference", reference.0));
    let winner_out = dir.join(preview_name("match", winner.0));

    save_one(&make_preview(reference.1, config)?, &reference_out)?;
    save_one(&make_preview(winner.1, config)?, &winner_out)?;

    Ok((reference_out, winner_out))
}

fn preview_name(prefix: &str, source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    format!("{}_{}.png", prefix, stem)
}

fn save_one(image: &GrayImage, path: &Path) -> Result<(), PreviewError> {
    image.save(path).map_err(|e| PreviewError::SaveFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use tempfile::TempDir;

    #[test]
    fn default_box_is_200_square() {
        let config = PreviewConfig::default();
        assert_eq!((config.max_width, config.max_height), (200, 200));
    }

    #[test]
    fn preview_fits_default_box() {
        let image = GrayImage::from_pixel(1000, 500, Luma([90]));
        let preview = make_preview(&image, &PreviewConfig::default()).unwrap();

        assert_eq!(preview.dimensions(), (200, 100));
    }

    #[test]
    fn previews_are_written_as_png() {
        let dir = TempDir::new().unwrap();
        let reference = GrayImage::from_pixel(40, 20, Luma([0]));
        let winner = GrayImage::from_pixel(20, 40, Luma([255]));

        let (reference_out, winner_out) = save_previews(
            dir.path(),
            (Path::new("/photos/query.jpg"), &reference),
            (Path::new("/photos/folder/best.bmp"), &winner),
            &PreviewConfig::square(10),
        )
        .unwrap();

        assert!(reference_out.ends_with("reference_query.png"));
        assert!(winner_out.ends_with("match_best.png"));

        let written = image::open(&winner_out).unwrap().to_luma8();
        assert_eq!(written.dimensions(), (5, 10));
    }
}
