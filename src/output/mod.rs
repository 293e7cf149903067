//! Output formatting module
//!
//! Provides the console report and machine-readable output formats.

mod formatter;

pub use formatter::{write_results_to_file, OutputFormat, ResultFormatter};
