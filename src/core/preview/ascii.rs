//! Terminal rendering of grayscale previews.

use super::resize::{fit_within, PreviewResizer};
use crate::error::PreviewError;
use image::GrayImage;

/// Characters from darkest to brightest
const RAMP: &[u8] = b" .:-=+*#%@";

/// Renders grayscale images as ASCII art.
///
/// Terminal cells are roughly twice as tall as they are wide, so rows are
/// halved to keep the picture's proportions.
pub struct AsciiRenderer {
    /// Maximum characters per line
    columns: u32,
    /// Maximum number of lines
    rows: u32,
}

impl AsciiRenderer {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Render an image as lines of text
    pub fn render(&self, image: &GrayImage) -> Result<String, PreviewError> {
        // Fit in "pixel" space where a cell is 1 wide and 2 tall
        let (width, doubled_height) =
            fit_within(image.width(), image.height(), self.columns, self.rows * 2);
        let height = (doubled_height / 2).max(1);

        let mut resizer = PreviewResizer::new();
        let small = resizer.resize(image, width, height)?;

        let mut output = String::with_capacity(((width + 1) * height) as usize);
        for row in small.rows() {
            for pixel in row {
                output.push(shade(pixel[0]));
            }
            output.push('\n');
        }

        Ok(output)
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(40, 20)
    }
}

/// Character for an intensity
pub fn shade(value: u8) -> char {
    let index = value as usize * (RAMP.len() - 1) / 255;
    RAMP[index] as char
}
