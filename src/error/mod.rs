//! # Error Module
//!
//! User-friendly error types for the image similarity finder.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **User-friendly messages** - shown as-is by the CLI
//! - Undecodable files inside the candidate folder are *not* errors;
//!   they are skipped and reported as warnings

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("Please select both an image and a folder: {0}")]
    MissingSelection(#[from] SelectionError),

    #[error("Unable to read the input image: {0}")]
    Load(#[from] LoadError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A required input was not chosen before comparing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no reference image selected")]
    NoReference,

    #[error("no folder selected")]
    NoFolder,
}

/// Errors that occur while decoding an image file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Path of the file that failed to load
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::DecodeError { path, .. } => path,
            LoadError::IoError { path, .. } => path,
        }
    }
}

/// Errors that occur while listing the candidate folder
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur during comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("No images found in the folder")]
    EmptyCandidateSet,
}

/// Errors that occur while building or saving previews
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Invalid preview dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Resize failed: {0}")]
    ResizeFailed(String),

    #[error("Failed to save preview {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SimilarityError>;
