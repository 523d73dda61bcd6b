//! Read-only listing of matched logging calls.

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;

use super::utils::SourceFile;
use crate::engine;
use crate::matcher::TargetSpec;
use crate::utils::{normalize_display_path, LineIndex};

/// Options for the scan command
#[derive(Debug, Default)]
pub struct ScanOptions {
    /// Calls to look for
    pub targets: TargetSpec,
    /// Output raw JSON
    pub json: bool,
    /// Verbose output
    pub verbose: bool,
}

/// One matched call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMatch {
    /// File the call was found in
    pub file: String,
    /// 1-indexed line of the call start
    pub line: usize,
    /// 1-indexed byte column of the call start
    pub column: usize,
    /// Byte offset of the call start
    pub start: usize,
    /// Byte offset one past the call end
    pub end: usize,
    /// Source text of the call
    pub call: String,
}

/// A file that could not be scanned
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    /// File that failed
    pub file: String,
    /// Underlying error
    pub reason: String,
}

/// Everything a scan found
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Matches across all files, in file then source order
    pub matches: Vec<ScanMatch>,
    /// Files that could not be read or parsed
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Process exit code for this run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.failures.is_empty())
    }
}

fn scan_file(file: &SourceFile, targets: &TargetSpec) -> Result<Vec<ScanMatch>, ScanFailure> {
    let display = normalize_display_path(&file.path);
    let failure = |reason: String| ScanFailure {
        file: display.clone(),
        reason,
    };

    let content = fs::read_to_string(&file.path).map_err(|e| failure(e.to_string()))?;
    let spans = engine::scan(&content, targets).map_err(|e| failure(e.to_string()))?;

    let index = LineIndex::new(&content);
    Ok(spans
        .into_iter()
        .map(|span| {
            let (line, column) = index.line_col(span.start);
            ScanMatch {
                file: display.clone(),
                line,
                column,
                start: span.start,
                end: span.end,
                call: span.slice(&content).unwrap_or_default().to_owned(),
            }
        })
        .collect())
}

/// List every targeted call without modifying any file.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn run_scan<W: Write>(
    files: &[SourceFile],
    options: &ScanOptions,
    mut writer: W,
) -> Result<ScanReport> {
    let pb = crate::output::create_progress_bar(files.len() as u64, options.json);

    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            let result = scan_file(file, &options.targets);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    let mut report = ScanReport::default();
    for result in results {
        match result {
            Ok(matches) => report.matches.extend(matches),
            Err(failure) => report.failures.push(failure),
        }
    }

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(report);
    }

    if options.verbose {
        crate::output::print_targets(&mut writer, &options.targets)?;
    }

    for m in &report.matches {
        writeln!(
            writer,
            "{}:{}:{}: {}",
            m.file.bold(),
            m.line,
            m.column,
            first_line(&m.call)
        )?;
    }
    for failure in &report.failures {
        writeln!(
            writer,
            "{} {}: {}",
            "Parse error:".red(),
            failure.file,
            failure.reason
        )?;
    }

    let file_count = {
        let mut names: Vec<&str> = report.matches.iter().map(|m| m.file.as_str()).collect();
        names.dedup();
        names.len()
    };
    writeln!(
        writer,
        "\nFound {} logging call(s) in {} file(s)",
        report.matches.len(),
        file_count
    )?;

    Ok(report)
}

/// Calls spanning several lines are shown by their first line.
fn first_line(call: &str) -> String {
    match call.split_once('\n') {
        Some((head, _)) => format!("{} …", head.trim_end()),
        None => call.to_owned(),
    }
}
