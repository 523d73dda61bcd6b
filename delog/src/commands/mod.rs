//! Commands module - CLI subcommand implementations.
//!
//! The default command rewrites files; `scan` only lists what would match.

mod scan;
mod strip;
mod utils;

// Re-export all public items
pub use scan::{run_scan, ScanFailure, ScanMatch, ScanOptions, ScanReport};
pub use strip::{run_strip, FileReport, FileStatus, StripOptions, StripSummary, WriteMode};
pub use utils::{find_js_files, merge_excludes, Discovery, SourceFile};
