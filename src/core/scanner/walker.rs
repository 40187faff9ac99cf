//! Directory listing implementation using walkdir.

use super::{filter::EntryFilter, FolderScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the folder scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Descend into subdirectories (default: top level only)
    pub recursive: bool,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Drop hidden files and directories (default: every file is listed)
    pub skip_hidden: bool,
    /// Extensions to accept (None = every file is tried)
    pub extensions: Option<Vec<String>>,
}

/// Scanner implementation using the walkdir crate.
///
/// Entries come back sorted by file name within each directory.
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: EntryFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = EntryFilter::new().with_skip_hidden(config.skip_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    fn scan_error(error: walkdir::Error) -> ScanError {
        let path = error.path().map(|p| p.to_path_buf()).unwrap_or_default();

        if error.io_error().map(|e| e.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
            ScanError::PermissionDenied { path }
        } else {
            ScanError::ReadDirectory {
                path,
                source: std::io::Error::other(error.to_string()),
            }
        }
    }
}

impl FolderScanner for WalkDirScanner {
    fn scan(&self, folder: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(folder, &null_sender())
    }

    fn scan_with_events(
        &self,
        folder: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        if !folder.exists() {
            return Err(ScanError::DirectoryNotFound {
                path: folder.to_path_buf(),
            });
        }

        if !folder.is_dir() {
            return Err(ScanError::NotADirectory {
                path: folder.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            path: folder.to_path_buf(),
        }));

        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let skip_hidden = self.filter.skips_hidden();

        let walker = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            // Prune hidden directories instead of walking into them
            .filter_entry(move |entry| {
                !skip_hidden
                    || !entry.file_type().is_dir()
                    || !EntryFilter::is_hidden(entry.path())
            });

        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() && !entry.path().is_file() {
                        continue;
                    }

                    if !self.filter.should_include(entry.path()) {
                        continue;
                    }

                    events.send(Event::Scan(ScanEvent::FileFound {
                        path: entry.path().to_path_buf(),
                    }));

                    files.push(entry.into_path());
                }
                Err(e) => {
                    let error = Self::scan_error(e);
                    let path = match &error {
                        ScanError::PermissionDenied { path } => path.clone(),
                        ScanError::ReadDirectory { path, .. } => path.clone(),
                        _ => folder.to_path_buf(),
                    };

                    tracing::warn!(path = %path.display(), "{}", error);
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));

                    errors.push(error);
                }
            }
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: files.len(),
        }));

        Ok(ScanResult { files, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_lists_every_file_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "b.png");
        touch(temp_dir.path(), "c.txt");
        touch(temp_dir.path(), "a.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        let names: Vec<_> = result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.txt"]);
    }

    #[test]
    fn scan_is_top_level_only_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();
        touch(temp_dir.path(), "root.png");
        touch(&subdir, "deep.png");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("root.png"));
    }

    #[test]
    fn scan_can_recurse() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();
        touch(temp_dir.path(), "root.png");
        touch(&subdir, "deep.png");

        let config = ScanConfig {
            recursive: true,
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn scan_skips_hidden_directories_when_asked() {
        let temp_dir = TempDir::new().unwrap();
        let hidden = temp_dir.path().join(".thumbnails");
        fs::create_dir(&hidden).unwrap();
        touch(&hidden, "thumb.png");
        touch(temp_dir.path(), "visible.png");

        let config = ScanConfig {
            recursive: true,
            skip_hidden: true,
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("visible.png"));
    }

    #[test]
    fn scan_lists_hidden_files_by_default() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "visible.jpg");
        touch(temp_dir.path(), ".hidden.jpg");

        let result = WalkDirScanner::new(ScanConfig::default())
            .scan(temp_dir.path())
            .unwrap();

        let names: Vec<_> = result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![".hidden.jpg", "visible.jpg"]);
    }

    #[test]
    fn scan_can_skip_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "visible.jpg");
        touch(temp_dir.path(), ".hidden.jpg");

        let config = ScanConfig {
            skip_hidden: true,
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("visible.jpg"));
    }

    #[test]
    fn scan_respects_extension_list() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "keep.png");
        touch(temp_dir.path(), "drop.txt");

        let config = ScanConfig {
            extensions: Some(vec!["png".to_string()]),
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("keep.png"));
    }

    #[test]
    fn scan_nonexistent_directory_returns_error() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }

    #[test]
    fn scan_file_instead_of_directory_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = touch(temp_dir.path(), "photo.png");

        let result = WalkDirScanner::new(ScanConfig::default()).scan(&file);

        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
    }
}
