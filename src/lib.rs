//! # Image Similarity
//!
//! Finds the image in a folder that looks most like a reference image.
//!
//! ## How Similarity Is Measured
//! Both images are read as grayscale, every sample is scaled to `[0, 1]`,
//! and the Euclidean distance is taken over the top-left region the two
//! images share. The candidate with the smallest distance wins; on a tie
//! the first one compared wins.
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - Distance engine, loading, folder scanning, reporting
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SimilarityError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
/// `RUST_LOG` wins when set; otherwise `default_level` (any `EnvFilter`
/// directive string) is used.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
