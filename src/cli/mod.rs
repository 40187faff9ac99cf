//! # CLI Module
//!
//! Command-line interface for the image similarity finder.
//!
//! ## Usage
//! ```bash
//! # Find the closest image in a folder
//! image-match compare --image query.png --folder ~/Pictures
//!
//! # Show previews of both images in the terminal
//! image-match compare -i query.png -f ~/Pictures --preview
//!
//! # Save 200x200 previews next to each other
//! image-match compare -i query.png -f ~/Pictures --preview-dir ./previews
//!
//! # JSON output for scripting
//! image-match compare -i query.png -f ~/Pictures --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_similarity::core::pipeline::{Comparison, ComparisonOutcome};
use image_similarity::core::preview::{
    make_preview, save_previews, AsciiRenderer, PreviewConfig,
};
use image_similarity::core::reporter::{
    base_name, export, format_score, ExportFormat, MatchReport,
};
use image_similarity::error::{Result, SimilarityError};
use image_similarity::events::{CompareEvent, Event, EventChannel, LoadEvent, PipelineEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

/// Image Similarity - Find the closest-looking image in a folder
#[derive(Parser, Debug)]
#[command(name = "image-match")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare an image against every image in a folder
    Compare {
        /// Reference image
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Folder of candidate images
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Also look inside subfolders
        #[arg(short, long)]
        recursive: bool,

        /// Leave out hidden files (names starting with '.')
        #[arg(long)]
        skip_hidden: bool,

        /// Only try files with these extensions (comma separated)
        #[arg(long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// Draw previews of the reference and the match in the terminal
        #[arg(long)]
        preview: bool,

        /// Bounding box for previews, in pixels
        #[arg(long, default_value = "200")]
        preview_size: u32,

        /// Save previews of the reference and the match as PNG files here
        #[arg(long)]
        preview_dir: Option<PathBuf>,

        /// Number of best matches to list
        #[arg(short, long, default_value = "1")]
        top: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON report for scripting
    Json,
    /// Every candidate's score as CSV
    Csv,
    /// Winner path and score only
    Minimal,
}

/// Options that only affect how results are shown
struct DisplayOptions {
    output: OutputFormat,
    preview: bool,
    preview_config: PreviewConfig,
    preview_dir: Option<PathBuf>,
    top: usize,
    verbose: bool,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let Commands::Compare {
        image,
        folder,
        output,
        recursive,
        skip_hidden,
        extensions,
        preview,
        preview_size,
        preview_dir,
        top,
        verbose,
    } = cli.command;

    image_similarity::init_tracing(&log_filter(output, verbose));

    let display = DisplayOptions {
        output,
        preview,
        preview_config: PreviewConfig::square(preview_size),
        preview_dir,
        top,
        verbose,
    };

    let comparison = Comparison::builder()
        .reference(image)
        .folder(folder)
        .recursive(recursive)
        .skip_hidden(skip_hidden)
        .extensions(extensions)
        .build();

    match run_compare(&comparison, &display) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Term::stderr()
                .write_line(&format!("{} {}", style("Error:").red().bold(), e))
                .ok();
            ExitCode::FAILURE
        }
    }
}

fn run_compare(comparison: &Comparison, display: &DisplayOptions) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(display.output, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Image Similarity").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = display.verbose;

    // Progress rendering only; the comparison itself stays on this thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };

            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}", phase));
                }
                Event::Load(LoadEvent::ReferenceLoaded { path, width, height }) => {
                    pb.set_message(format!("{} ({}x{})", base_name(&path), width, height));
                }
                Event::Load(LoadEvent::Started { total_files }) => {
                    pb.set_length(total_files as u64);
                    pb.set_position(0);
                }
                Event::Load(LoadEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                }
                Event::Load(LoadEvent::Skipped { path, reason }) => {
                    let line = if verbose {
                        format!("Unable to read image '{}': {}", display_path(&path), reason)
                    } else {
                        format!("Unable to read image '{}'", display_path(&path))
                    };
                    pb.println(format!("  {} {}", style("Warning:").yellow(), line));
                }
                Event::Compare(CompareEvent::Started { total_candidates }) => {
                    pb.set_length(total_candidates as u64);
                    pb.set_position(0);
                }
                Event::Compare(CompareEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(format!(
                            "{} ({})",
                            base_name(&p.current_path),
                            format_score(p.distance)
                        ));
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Error { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    if pretty {
        if let Some(image) = comparison.reference() {
            term.write_line(&format!("  Selected Image: {}", display_path(image)))
                .ok();
        }
        if let Some(folder) = comparison.folder() {
            term.write_line(&format!("  Selected Folder: {}", display_path(folder)))
                .ok();
        }
    }

    let result = comparison.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let outcome = result?;

    match display.output {
        OutputFormat::Pretty => print_pretty_results(&term, &outcome, display),
        OutputFormat::Json => print_export(&outcome.report, ExportFormat::Json)?,
        OutputFormat::Csv => print_export(&outcome.report, ExportFormat::Csv)?,
        OutputFormat::Minimal => print_minimal_results(&outcome.report),
    }

    if let Some(ref dir) = display.preview_dir {
        let (reference_out, winner_out) = save_previews(
            dir,
            (&outcome.report.reference, &outcome.reference_image),
            (&outcome.report.winner, &outcome.winner_image),
            &display.preview_config,
        )?;

        if pretty {
            term.write_line(&format!(
                "  {} {}, {}",
                style("Previews saved:").dim(),
                display_path(&reference_out),
                display_path(&winner_out)
            ))
            .ok();
        }
    }

    Ok(())
}

fn print_pretty_results(term: &Term, outcome: &ComparisonOutcome, display: &DisplayOptions) {
    let report = &outcome.report;

    term.write_line("").ok();
    term.write_line(&format!(
        "{} Comparison Complete",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  Closest match: {} with distance {}",
        style(&report.winner_name).green().bold(),
        style(format_score(report.distance)).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} images compared in {:.1}s",
        style(report.candidates_compared()).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    if !report.skipped.is_empty() {
        term.write_line(&format!(
            "  {} files skipped (not readable as images)",
            style(report.skipped.len()).yellow()
        ))
        .ok();
    }

    if !report.scan_errors.is_empty() {
        term.write_line(&format!(
            "  {} folder entries could not be read",
            style(report.scan_errors.len()).yellow()
        ))
        .ok();
        if display.verbose {
            for error in &report.scan_errors {
                term.write_line(&format!("    {}", style(error).dim())).ok();
            }
        }
    }

    if display.top > 1 {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Best Matches:").bold().underlined()))
            .ok();
        term.write_line("").ok();

        for (i, result) in report.top(display.top).iter().enumerate() {
            let marker = if result.identity == report.winner {
                style("★").green().to_string()
            } else {
                style("○").dim().to_string()
            };

            term.write_line(&format!(
                "  {} {:>3}. {}  {}",
                marker,
                i + 1,
                display_path(&result.identity),
                style(format_score(result.distance)).cyan()
            ))
            .ok();
        }
    }

    if display.preview {
        let renderer = AsciiRenderer::default();

        let previews = [
            ("Reference", &report.reference, &outcome.reference_image),
            ("Closest match", &report.winner, &outcome.winner_image),
        ];

        for (label, path, image) in previews {
            term.write_line("").ok();
            term.write_line(&format!(
                "{} {}",
                style(format!("{}:", label)).bold(),
                style(base_name(path)).dim()
            ))
            .ok();

            // Rendered from the bounded preview, not the full image
            let rendered = make_preview(image, &display.preview_config)
                .and_then(|bounded| renderer.render(&bounded));

            match rendered {
                Ok(text) => {
                    for line in text.lines() {
                        term.write_line(&format!("  {}", line)).ok();
                    }
                }
                Err(e) => {
                    term.write_line(&format!("  {}", style(e.to_string()).dim()))
                        .ok();
                }
            }
        }
    }

    term.write_line("").ok();
}

fn print_export(report: &MatchReport, format: ExportFormat) -> Result<()> {
    let stdout = std::io::stdout();
    export(report, format, stdout.lock())
        .map_err(|e| SimilarityError::Config(format!("failed to write output: {}", e)))?;
    println!();
    Ok(())
}

fn print_minimal_results(report: &MatchReport) {
    println!("{}\t{}", report.winner.display(), format_score(report.distance));
}

/// Default log filter for the chosen output.
///
/// Pretty output prints its own warning for each skipped file, so the
/// loader's log lines are held back there.
fn log_filter(output: OutputFormat, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };

    match output {
        OutputFormat::Pretty => format!("{},image_similarity::core::loader=error", level),
        _ => level.to_string(),
    }
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn pretty_output_holds_back_loader_warnings() {
        let filter = log_filter(OutputFormat::Pretty, false);

        assert_eq!(filter, "warn,image_similarity::core::loader=error");
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn verbose_pretty_output_still_holds_back_loader_warnings() {
        let filter = log_filter(OutputFormat::Pretty, true);

        assert!(filter.starts_with("debug,"));
        assert!(filter.ends_with("image_similarity::core::loader=error"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn machine_output_keeps_loader_warnings() {
        assert_eq!(log_filter(OutputFormat::Json, false), "warn");
        assert_eq!(log_filter(OutputFormat::Csv, false), "warn");
        assert_eq!(log_filter(OutputFormat::Minimal, true), "debug");
    }

    #[test]
    fn hidden_files_are_kept_unless_skipped() {
        let cli = Cli::parse_from(["image-match", "compare", "-i", "a.png", "-f", "dir"]);
        let Commands::Compare { skip_hidden, .. } = cli.command;
        assert!(!skip_hidden);

        let cli = Cli::parse_from([
            "image-match",
            "compare",
            "-i",
            "a.png",
            "-f",
            "dir",
            "--skip-hidden",
        ]);
        let Commands::Compare { skip_hidden, .. } = cli.command;
        assert!(skip_hidden);
    }
}
