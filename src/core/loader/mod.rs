//! # Loader Module
//!
//! Turns image files into 8-bit grayscale pixel grids.
//!
//! ## Failure Policy
//! - The reference image must decode; failure is a [`LoadError`]
//! - Candidate files that fail to decode are skipped with a warning and
//!   recorded in [`LoadedCandidates::skipped`]; the rest still load
//!
//! ## Example
//! ```rust,ignore
//! use image_similarity::core::loader::{load_reference, load_candidates};
//!
//! let reference = load_reference(&path)?;
//! let loaded = load_candidates(&files);
//! for skipped in &loaded.skipped {
//!     eprintln!("skipped {}", skipped.path.display());
//! }
//! ```

mod decode;

pub use decode::{rgb_to_gray, DecodeRoute, GrayDecoder};

use crate::error::LoadError;
use crate::events::{null_sender, Event, EventSender, LoadEvent, LoadProgress};
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A candidate file that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Path of the file
    pub path: PathBuf,
    /// Why decoding failed
    pub reason: String,
}

/// Result of decoding a list of candidate files
#[derive(Debug, Default)]
pub struct LoadedCandidates {
    /// Decoded images in the order their paths were given
    pub candidates: Vec<(PathBuf, GrayImage)>,
    /// Files that were not decodable
    pub skipped: Vec<SkippedFile>,
}

impl LoadedCandidates {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Decode the reference image as grayscale
pub fn load_reference(path: &Path) -> Result<GrayImage, LoadError> {
    let image = GrayDecoder::decode(path)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "reference image loaded"
    );
    Ok(image)
}

/// Decode every file, skipping the ones that fail
pub fn load_candidates(paths: &[PathBuf]) -> LoadedCandidates {
    load_candidates_with_events(paths, &null_sender())
}

/// Decode every file with progress reporting via events
pub fn load_candidates_with_events(paths: &[PathBuf], events: &EventSender) -> LoadedCandidates {
    let total = paths.len();
    let mut loaded = LoadedCandidates::default();

    events.send(Event::Load(LoadEvent::Started { total_files: total }));

    for (index, path) in paths.iter().enumerate() {
        match GrayDecoder::decode(path) {
            Ok(image) => {
                loaded.candidates.push((path.clone(), image));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Unable to read image: {}", e);

                let skipped = SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                };

                events.send(Event::Load(LoadEvent::Skipped {
                    path: skipped.path.clone(),
                    reason: skipped.reason.clone(),
                }));

                loaded.skipped.push(skipped);
            }
        }

        events.send(Event::Load(LoadEvent::Progress(LoadProgress {
            completed: index + 1,
            total,
            current_path: path.clone(),
        })));
    }

    events.send(Event::Load(LoadEvent::Completed {
        loaded: loaded.candidates.len(),
        skipped: loaded.skipped.len(),
    }));

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChannel;
    use image::Luma;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, value: u8) -> PathBuf {
        let path = dir.path().join(name);
        GrayImage::from_pixel(3, 3, Luma([value])).save(&path).unwrap();
        path
    }

    fn write_garbage(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"not an image").unwrap();
        path
    }

    #[test]
    fn reference_that_does_not_decode_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_garbage(&dir, "reference.png");

        assert!(load_reference(&path).is_err());
    }

    #[test]
    fn candidates_keep_input_order() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_png(&dir, "c.png", 30),
            write_png(&dir, "a.png", 10),
            write_png(&dir, "b.png", 20),
        ];

        let loaded = load_candidates(&paths);

        let loaded_paths: Vec<_> = loaded.candidates.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(loaded_paths, paths);
        assert_eq!(loaded.candidates[1].1.get_pixel(0, 0)[0], 10);
    }

    #[test]
    fn undecodable_candidates_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_png(&dir, "good.png", 50),
            write_garbage(&dir, "notes.txt"),
            write_garbage(&dir, "broken.jpg"),
        ];

        let loaded = load_candidates(&paths);

        assert_eq!(loaded.candidates.len(), 1);
        assert_eq!(loaded.skipped.len(), 2);
        assert!(loaded.skipped.iter().any(|s| s.path.ends_with("broken.jpg")));
        assert!(loaded.skipped.iter().all(|s| !s.reason.is_empty()));
    }

    #[test]
    fn nothing_decodable_yields_empty() {
        let dir = TempDir::new().unwrap();
        let paths = vec![write_garbage(&dir, "a.txt")];

        assert!(load_candidates(&paths).is_empty());
    }

    #[test]
    fn skip_events_are_emitted() {
        let dir = TempDir::new().unwrap();
        let paths = vec![write_png(&dir, "good.png", 0), write_garbage(&dir, "bad.png")];
        let (sender, receiver) = EventChannel::new();

        load_candidates_with_events(&paths, &sender);
        drop(sender);

        let events: Vec<Event> = receiver.iter().collect();
        let skipped: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::Load(LoadEvent::Skipped { path, .. }) => Some(path.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(skipped, vec![dir.path().join("bad.png")]);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::Load(LoadEvent::Completed { loaded: 1, skipped: 1 })
        )));
    }
}
