//! # Pipeline Module
//!
//! Runs one comparison from selected paths to a report.
//!
//! ## Stages
//! 1. **Check selection** - both a reference image and a folder are needed
//! 2. **Load reference** - decode as grayscale, fail if it does not decode
//! 3. **Scan** - list the folder's files
//! 4. **Load candidates** - decode each file, skipping failures
//! 5. **Compare** - score every candidate and pick the closest
//!
//! This is the layer a front end calls. It owns no UI state: the selected
//! paths come in as parameters and a report goes out.

mod executor;

pub use executor::{Comparison, ComparisonBuilder, ComparisonConfig, ComparisonOutcome};
