//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Folder listing events
    Scan(ScanEvent),
    /// Image decoding events
    Load(LoadEvent),
    /// Distance computation events
    Compare(CompareEvent),
    /// Run-level events
    Pipeline(PipelineEvent),
}

/// Events while listing the candidate folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Listing has started
    Started { path: PathBuf },
    /// A candidate file was found
    FileFound { path: PathBuf },
    /// An entry could not be read but listing continues
    Error { path: PathBuf, message: String },
    /// Listing completed
    Completed { total_files: usize },
}

/// Events while decoding images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoadEvent {
    /// The reference image decoded
    ReferenceLoaded {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    /// Candidate decoding has started
    Started { total_files: usize },
    /// Progress update during candidate decoding
    Progress(LoadProgress),
    /// A candidate was not decodable and will be ignored
    Skipped { path: PathBuf, reason: String },
    /// Candidate decoding completed
    Completed { loaded: usize, skipped: usize },
}

/// Progress information during decoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadProgress {
    /// Files attempted so far
    pub completed: usize,
    /// Files to attempt
    pub total: usize,
    /// File just attempted
    pub current_path: PathBuf,
}

/// Events while computing distances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// Comparison has started
    Started { total_candidates: usize },
    /// One candidate has been scored
    Progress(CompareProgress),
    /// The closest candidate is known
    Completed { winner: PathBuf, distance: f64 },
}

/// Progress information during comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareProgress {
    /// Candidates scored so far
    pub completed: usize,
    /// Candidates to score
    pub total: usize,
    /// Candidate just scored
    pub current_path: PathBuf,
    /// Its distance to the reference
    pub distance: f64,
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Run has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Run completed successfully
    Completed { summary: PipelineSummary },
    /// Run aborted with an error
    Error { message: String },
}

/// Phases of a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    LoadingReference,
    Scanning,
    LoadingCandidates,
    Comparing,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Candidates that were decoded and scored
    pub candidates_compared: usize,
    /// Files skipped as undecodable
    pub skipped: usize,
    /// Closest candidate
    pub winner: PathBuf,
    /// Its distance
    pub distance: f64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::LoadingReference => write!(f, "Loading reference"),
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::LoadingCandidates => write!(f, "Loading images"),
            PipelinePhase::Comparing => write!(f, "Comparing"),
        }
    }
}
