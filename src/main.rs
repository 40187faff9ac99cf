//! # image-match CLI
//!
//! Command-line interface for the image similarity finder.
//!
//! ## Usage
//! ```bash
//! image-match compare --image query.png --folder ~/Pictures
//! image-match compare -i query.png -f ~/Pictures --preview --output json
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
