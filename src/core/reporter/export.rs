//! Export functionality for match reports.
//!
//! JSON carries the whole report; CSV carries the per-candidate scores.

use super::{format_score, MatchReport};
use std::io::Write;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Export in the given format
pub fn export<W: Write>(
    report: &MatchReport,
    format: ExportFormat,
    writer: W,
) -> std::io::Result<()> {
    match format {
        ExportFormat::Json => export_json(report, writer),
        ExportFormat::Csv => export_csv(report, writer),
    }
}

/// Export the full report as pretty-printed JSON
pub fn export_json<W: Write>(report: &MatchReport, writer: W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(writer, report).map_err(std::io::Error::from)
}

/// Export candidate scores as CSV
///
/// CSV columns: Candidate Path, Distance, Is Winner
pub fn export_csv<W: Write>(report: &MatchReport, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "Candidate Path,Distance,Is Winner")?;

    for result in &report.ranking {
        writeln!(
            writer,
            "{},{},{}",
            csv_field(&result.identity.display().to_string()),
            format_score(result.distance),
            result.identity == report.winner
        )?;
    }

    Ok(())
}

/// Quote a field if it contains a separator, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
