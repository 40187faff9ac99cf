//! Comparison run implementation.

use crate::core::engine::{compare_all_with_progress, select_closest};
use crate::core::loader::{load_candidates_with_events, load_reference};
use crate::core::reporter::{base_name, MatchReport};
use crate::core::scanner::{FolderScanner, ScanConfig, WalkDirScanner};
use crate::error::{CompareError, SelectionError, SimilarityError};
use crate::events::{
    null_sender, CompareEvent, CompareProgress, Event, EventSender, LoadEvent, PipelineEvent,
    PipelinePhase, PipelineSummary,
};
use chrono::Utc;
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of a successful run
#[derive(Debug)]
pub struct ComparisonOutcome {
    /// What was found
    pub report: MatchReport,
    /// The decoded reference, kept for previews
    pub reference_image: GrayImage,
    /// The decoded winner, kept for previews
    pub winner_image: GrayImage,
}

/// Configuration for a run
#[derive(Debug, Clone, Default)]
pub struct ComparisonConfig {
    /// Reference image chosen by the user
    pub reference: Option<PathBuf>,
    /// Folder of candidates chosen by the user
    pub folder: Option<PathBuf>,
    /// How the folder is listed
    pub scan_config: ScanConfig,
}

/// Builder for comparison runs
pub struct ComparisonBuilder {
    config: ComparisonConfig,
}

impl ComparisonBuilder {
    pub fn new() -> Self {
        Self {
            config: ComparisonConfig::default(),
        }
    }

    /// Set the reference image (None = not selected yet)
    pub fn reference(mut self, path: Option<PathBuf>) -> Self {
        self.config.reference = path;
        self
    }

    /// Set the candidate folder (None = not selected yet)
    pub fn folder(mut self, path: Option<PathBuf>) -> Self {
        self.config.folder = path;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Descend into subfolders
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.scan_config.recursive = recursive;
        self
    }

    /// Leave hidden files out
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.config.scan_config.skip_hidden = skip;
        self
    }

    /// Only try files with these extensions
    pub fn extensions(mut self, extensions: Option<Vec<String>>) -> Self {
        self.config.scan_config.extensions = extensions;
        self
    }

    pub fn build(self) -> Comparison {
        Comparison {
            config: self.config,
        }
    }
}

impl Default for ComparisonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One reference-against-folder comparison.
///
/// Every run starts from scratch: nothing is cached between runs and all
/// work happens on the calling thread.
pub struct Comparison {
    config: ComparisonConfig,
}

impl Comparison {
    pub fn builder() -> ComparisonBuilder {
        ComparisonBuilder::new()
    }

    /// Selected reference image, if any
    pub fn reference(&self) -> Option<&Path> {
        self.config.reference.as_deref()
    }

    /// Selected folder, if any
    pub fn folder(&self) -> Option<&Path> {
        self.config.folder.as_deref()
    }

    /// Run without events
    pub fn run(&self) -> Result<ComparisonOutcome, SimilarityError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting.
    ///
    /// Fails when a selection is missing, the reference does not decode,
    /// the folder cannot be listed, or no file in it decodes. Undecodable
    /// candidates are skipped with a warning.
    pub fn run_with_events(
        &self,
        events: &EventSender,
    ) -> Result<ComparisonOutcome, SimilarityError> {
        events.send(Event::Pipeline(PipelineEvent::Started));

        let result = self.execute(events);

        if let Err(ref e) = result {
            tracing::error!("comparison failed: {}", e);
            events.send(Event::Pipeline(PipelineEvent::Error {
                message: e.to_string(),
            }));
        }

        result
    }

    fn execute(&self, events: &EventSender) -> Result<ComparisonOutcome, SimilarityError> {
        let start_time = Instant::now();

        let reference_path = self
            .config
            .reference
            .clone()
            .ok_or(SelectionError::NoReference)?;
        let folder = self.config.folder.clone().ok_or(SelectionError::NoFolder)?;

        tracing::info!(
            reference = %reference_path.display(),
            folder = %folder.display(),
            "starting comparison"
        );

        // Phase 1: Reference
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::LoadingReference,
        }));

        let reference_image = load_reference(&reference_path)?;

        events.send(Event::Load(LoadEvent::ReferenceLoaded {
            path: reference_path.clone(),
            width: reference_image.width(),
            height: reference_image.height(),
        }));

        // Phase 2: Listing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scanner = WalkDirScanner::new(self.config.scan_config.clone());
        let scan_result = scanner.scan_with_events(&folder, events)?;
        let scan_errors: Vec<String> = scan_result.errors.iter().map(|e| e.to_string()).collect();

        // Phase 3: Decoding
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::LoadingCandidates,
        }));

        let loaded = load_candidates_with_events(&scan_result.files, events);

        if loaded.is_empty() {
            return Err(CompareError::EmptyCandidateSet.into());
        }

        // Phase 4: Comparing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Comparing,
        }));

        let total = loaded.candidates.len();
        events.send(Event::Compare(CompareEvent::Started {
            total_candidates: total,
        }));

        // Same as find_closest, split so the full ranking is kept for the report
        let ranking =
            compare_all_with_progress(&reference_image, &loaded.candidates, |index, result| {
                tracing::debug!(
                    path = %result.identity.display(),
                    distance = result.distance,
                    "candidate scored"
                );

                events.send(Event::Compare(CompareEvent::Progress(CompareProgress {
                    completed: index + 1,
                    total,
                    current_path: result.identity.clone(),
                    distance: result.distance,
                })));
            });

        let best = select_closest(&ranking)?;

        let winner_image = loaded
            .candidates
            .into_iter()
            .find(|(path, _)| path == &best.identity)
            .map(|(_, image)| image)
            .ok_or(CompareError::EmptyCandidateSet)?;

        events.send(Event::Compare(CompareEvent::Completed {
            winner: best.identity.clone(),
            distance: best.distance,
        }));

        let duration_ms = start_time.elapsed().as_millis() as u64;

        let report = MatchReport {
            reference: reference_path,
            folder,
            winner_name: base_name(&best.identity),
            winner: best.identity,
            distance: best.distance,
            ranking,
            skipped: loaded.skipped,
            scan_errors,
            compared_at: Utc::now(),
            duration_ms,
        };

        tracing::info!(
            winner = %report.winner.display(),
            distance = report.distance,
            compared = report.candidates_compared(),
            skipped = report.skipped.len(),
            "comparison finished"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                candidates_compared: report.candidates_compared(),
                skipped: report.skipped.len(),
                winner: report.winner.clone(),
                distance: report.distance,
                duration_ms,
            },
        }));

        Ok(ComparisonOutcome {
            report,
            reference_image,
            winner_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::events::EventChannel;
    use image::Luma;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32, value: u8) {
        GrayImage::from_pixel(width, height, Luma([value]))
            .save(path)
            .unwrap();
    }

    struct Fixture {
        _dir: TempDir,
        reference: PathBuf,
        folder: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("reference.png");
        let folder = dir.path().join("candidates");
        fs::create_dir(&folder).unwrap();

        write_png(&reference, 2, 2, 0);
        write_png(&folder.join("a_white.png"), 2, 2, 255);
        write_png(&folder.join("b_black.png"), 2, 2, 0);

        Fixture {
            _dir: dir,
            reference,
            folder,
        }
    }

    #[test]
    fn builder_stores_selection() {
        let comparison = Comparison::builder()
            .reference(Some(PathBuf::from("/photos/query.png")))
            .folder(Some(PathBuf::from("/photos")))
            .recursive(true)
            .build();

        assert_eq!(
            comparison.config.reference,
            Some(PathBuf::from("/photos/query.png"))
        );
        assert!(comparison.config.scan_config.recursive);
    }

    #[test]
    fn missing_reference_is_reported_first() {
        let result = Comparison::builder().build().run();

        assert!(matches!(
            result,
            Err(SimilarityError::MissingSelection(SelectionError::NoReference))
        ));
    }

    #[test]
    fn missing_folder_is_reported() {
        let f = fixture();
        let result = Comparison::builder()
            .reference(Some(f.reference.clone()))
            .build()
            .run();

        assert!(matches!(
            result,
            Err(SimilarityError::MissingSelection(SelectionError::NoFolder))
        ));
    }

    #[test]
    fn finds_identical_candidate() {
        let f = fixture();
        let outcome = Comparison::builder()
            .reference(Some(f.reference.clone()))
            .folder(Some(f.folder.clone()))
            .build()
            .run()
            .unwrap();

        assert_eq!(outcome.report.winner_name, "b_black.png");
        assert_eq!(outcome.report.summary(), "Closest match: b_black.png with distance 0.00");
        assert_eq!(outcome.report.ranking[0].distance, 2.0);
        assert_eq!(outcome.winner_image.dimensions(), (2, 2));
    }

    #[test]
    fn undecodable_reference_is_a_load_error() {
        let f = fixture();
        let broken = f.folder.join("broken.png");
        fs::write(&broken, b"nope").unwrap();

        let result = Comparison::builder()
            .reference(Some(broken))
            .folder(Some(f.folder.clone()))
            .build()
            .run();

        assert!(matches!(
            result,
            Err(SimilarityError::Load(LoadError::DecodeError { .. }))
                | Err(SimilarityError::Load(LoadError::IoError { .. }))
        ));
    }

    #[test]
    fn folder_without_images_is_an_empty_candidate_set() {
        let f = fixture();
        let empty = f.folder.join("empty");
        fs::create_dir(&empty).unwrap();
        fs::write(empty.join("readme.txt"), b"no pictures here").unwrap();

        let result = Comparison::builder()
            .reference(Some(f.reference.clone()))
            .folder(Some(empty))
            .build()
            .run();

        assert!(matches!(
            result,
            Err(SimilarityError::Compare(CompareError::EmptyCandidateSet))
        ));
    }

    #[test]
    fn undecodable_candidates_are_skipped() {
        let f = fixture();
        fs::write(f.folder.join("c_notes.txt"), b"not an image").unwrap();

        let outcome = Comparison::builder()
            .reference(Some(f.reference.clone()))
            .folder(Some(f.folder.clone()))
            .build()
            .run()
            .unwrap();

        assert_eq!(outcome.report.candidates_compared(), 2);
        assert_eq!(outcome.report.skipped.len(), 1);
        assert!(outcome.report.skipped[0].path.ends_with("c_notes.txt"));
    }

    #[test]
    fn emits_completion_event() {
        let f = fixture();
        let (sender, receiver) = EventChannel::new();

        Comparison::builder()
            .reference(Some(f.reference.clone()))
            .folder(Some(f.folder.clone()))
            .build()
            .run_with_events(&sender)
            .unwrap();
        drop(sender);

        let completed = receiver.iter().find_map(|e| match e {
            Event::Pipeline(PipelineEvent::Completed { summary }) => Some(summary),
            _ => None,
        });

        let summary = completed.expect("completion event");
        assert_eq!(summary.candidates_compared, 2);
        assert!(summary.winner.ends_with("b_black.png"));
    }

    #[test]
    fn emits_error_event_on_failure() {
        let (sender, receiver) = EventChannel::new();

        let _ = Comparison::builder().build().run_with_events(&sender);
        drop(sender);

        assert!(receiver
            .iter()
            .any(|e| matches!(e, Event::Pipeline(PipelineEvent::Error { .. }))));
    }
}
