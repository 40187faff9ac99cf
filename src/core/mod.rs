//! # Core Module
//!
//! The GUI-agnostic image similarity engine and the plumbing around it.
//!
//! ## Modules
//! - `engine` - Pure distance computation and closest-match selection
//! - `loader` - Decodes files into grayscale images
//! - `scanner` - Lists candidate files in a folder
//! - `pipeline` - Runs a full reference-against-folder comparison
//! - `reporter` - Describes and exports the result
//! - `preview` - Aspect-preserving thumbnails for display

pub mod engine;
pub mod loader;
pub mod pipeline;
pub mod preview;
pub mod reporter;
pub mod scanner;

// Re-export commonly used types
pub use engine::{distance, find_closest, ComparisonResult, NormalizedImage};
pub use pipeline::{Comparison, ComparisonOutcome};
pub use reporter::MatchReport;
