//! # Scanner Module
//!
//! Lists the candidate files of a folder.
//!
//! Only the top level of the folder is listed unless recursion is turned
//! on. No extension filtering happens by default: every regular file is a
//! candidate and the loader decides whether it is an image.
//!
//! ## Example
//! ```rust,ignore
//! use image_similarity::core::scanner::{FolderScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/Users/me/Pictures"))?;
//! ```

mod filter;
mod walker;

pub use filter::EntryFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use std::path::{Path, PathBuf};

/// Result of listing a folder
#[derive(Debug)]
pub struct ScanResult {
    /// Candidate files, sorted by name
    pub files: Vec<PathBuf>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for folder scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
pub trait FolderScanner: Send + Sync {
    /// List the candidate files of a folder
    fn scan(&self, folder: &Path) -> Result<ScanResult, ScanError>;

    /// List with progress reporting via events
    fn scan_with_events(
        &self,
        folder: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError>;
}
