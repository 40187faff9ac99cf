//! # Reporter Module
//!
//! Describes the outcome of a comparison run.
//!
//! The headline is a single line naming the winning file and its score
//! with two decimals:
//!
//! ```text
//! Closest match: beach_02.png with distance 13.57
//! ```
//!
//! The full [`MatchReport`] also keeps every candidate's score in the order
//! the candidates were compared, plus the files that had to be skipped.

mod export;

pub use export::{export, export_csv, export_json, ExportFormat};

use crate::core::engine::ComparisonResult;
use crate::core::loader::SkippedFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything a front end needs to show the result of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// The reference image
    pub reference: PathBuf,
    /// The folder that was searched
    pub folder: PathBuf,
    /// Path of the closest candidate
    pub winner: PathBuf,
    /// Base file name of the closest candidate
    pub winner_name: String,
    /// Distance between the reference and the winner
    pub distance: f64,
    /// Every decoded candidate with its score, in comparison order
    pub ranking: Vec<ComparisonResult<PathBuf>>,
    /// Folder entries that were not decodable
    pub skipped: Vec<SkippedFile>,
    /// Folder entries that could not be read at all
    pub scan_errors: Vec<String>,
    /// When the run finished
    pub compared_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl MatchReport {
    /// Number of candidates that were scored
    pub fn candidates_compared(&self) -> usize {
        self.ranking.len()
    }

    /// The one-line result, e.g. `Closest match: a.png with distance 0.00`
    pub fn summary(&self) -> String {
        format!(
            "Closest match: {} with distance {}",
            self.winner_name,
            format_score(self.distance)
        )
    }

    /// The `n` best candidates, best first.
    ///
    /// Equal scores keep their comparison order, so the winner is always
    /// first.
    pub fn top(&self, n: usize) -> Vec<&ComparisonResult<PathBuf>> {
        let mut sorted: Vec<_> = self.ranking.iter().collect();
        sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        sorted.truncate(n);
        sorted
    }
}

/// Score with two decimal digits
pub fn format_score(distance: f64) -> String {
    format!("{:.2}", distance)
}

/// File name without its directory, for display
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
