//! # Similarity Engine
//!
//! Finds the candidate image closest to a reference image.
//!
//! ## Metric
//! Plain Euclidean distance over normalized grayscale intensities:
//! 1. Divide every sample by 255
//! 2. Take the top-left region both images share (min height x min width)
//! 3. Sum the squared differences over that region
//! 4. Return the square root
//!
//! Images of different sizes are cropped to the shared region, not resized.
//! This is a baseline metric, not a perceptual one.
//!
//! ## Purity
//! Nothing here touches the filesystem, the terminal, or any global state.
//! Callers hand in decoded images and get numbers back.
//!
//! ## Example
//! ```rust,ignore
//! use image_similarity::core::engine::find_closest;
//!
//! let best = find_closest(&reference, &[("a.png", a), ("b.png", b)])?;
//! println!("{} {:.2}", best.identity, best.distance);
//! ```

mod distance;
mod normalized;

pub use distance::{distance, Comparator};
pub use normalized::NormalizedImage;

use crate::error::CompareError;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Score of one candidate against the reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult<I> {
    /// Which candidate this is (file path, index, label...)
    pub identity: I,
    /// Euclidean distance to the reference, never negative
    pub distance: f64,
}

impl<I> ComparisonResult<I> {
    pub fn new(identity: I, distance: f64) -> Self {
        Self { identity, distance }
    }
}

/// Score every candidate against the reference, preserving input order
pub fn compare_all<I: Clone>(
    reference: &GrayImage,
    candidates: &[(I, GrayImage)],
) -> Vec<ComparisonResult<I>> {
    compare_all_with_progress(reference, candidates, |_, _| {})
}

/// Like [`compare_all`], calling `on_scored(index, result)` after each
/// candidate is scored.
pub fn compare_all_with_progress<I, F>(
    reference: &GrayImage,
    candidates: &[(I, GrayImage)],
    mut on_scored: F,
) -> Vec<ComparisonResult<I>>
where
    I: Clone,
    F: FnMut(usize, &ComparisonResult<I>),
{
    let comparator = Comparator::new(reference);

    candidates
        .iter()
        .enumerate()
        .map(|(index, (identity, image))| {
            let result = ComparisonResult::new(identity.clone(), comparator.distance_to(image));
            on_scored(index, &result);
            result
        })
        .collect()
}

/// Pick the lowest score; the earliest entry wins a tie.
pub fn select_closest<I: Clone>(
    results: &[ComparisonResult<I>],
) -> Result<ComparisonResult<I>, CompareError> {
    let mut best: Option<&ComparisonResult<I>> = None;

    for result in results {
        match best {
            Some(current) if result.distance >= current.distance => {}
            _ => best = Some(result),
        }
    }

    best.cloned().ok_or(CompareError::EmptyCandidateSet)
}

/// Find the candidate closest to the reference.
///
/// Fails with [`CompareError::EmptyCandidateSet`] when there are no
/// candidates. No other candidate has a strictly smaller distance than the
/// one returned.
pub fn find_closest<I: Clone>(
    reference: &GrayImage,
    candidates: &[(I, GrayImage)],
) -> Result<ComparisonResult<I>, CompareError> {
    if candidates.is_empty() {
        return Err(CompareError::EmptyCandidateSet);
    }

    select_closest(&compare_all(reference, candidates))
}
