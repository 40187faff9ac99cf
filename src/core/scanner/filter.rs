//! Entry filtering for the folder scanner.

use std::collections::HashSet;
use std::path::Path;

/// Decides which directory entries become candidates.
///
/// Every file is a candidate by default, hidden or not and whatever its
/// extension: whether it really is an image is settled by the decoder,
/// which skips what it cannot read. Skipping hidden files and an extension
/// list both narrow that down when asked for.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Lowercase extensions to accept (None = accept all)
    extensions: Option<HashSet<String>>,
    /// Whether to drop hidden files
    skip_hidden: bool,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop hidden files (starting with .)
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Only accept these extensions (case-insensitive, leading dot optional)
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = Some(
            extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        );
        self
    }

    /// Check whether a name is hidden
    pub fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }

    /// Whether hidden entries are dropped
    pub fn skips_hidden(&self) -> bool {
        self.skip_hidden
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if self.skip_hidden && Self::is_hidden(path) {
            return false;
        }

        match &self.extensions {
            None => true,
            Some(allowed) => path
                .extension()
                .and_then(|e| e.to_str())
                .map(|ext| allowed.contains(&ext.to_lowercase()))
                .unwrap_or(false),
        }
    }
}
