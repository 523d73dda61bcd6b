//! Rewrite command: neutralize logging calls in files.

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::utils::SourceFile;
use crate::engine::{self, Options};
use crate::utils::{normalize_display_path, relative_destination, validate_output_path};

/// Where rewritten sources go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite changed files
    #[default]
    InPlace,
    /// Report only
    DryRun,
    /// Report only; changes count as failure
    Check,
    /// Print the rewritten source
    Stdout,
    /// Mirror every processed file under a directory
    OutDir(PathBuf),
}

impl WriteMode {
    /// Whether files are left untouched.
    #[must_use]
    pub fn is_dry(&self) -> bool {
        matches!(self, Self::DryRun | Self::Check)
    }
}

/// Options for the strip command
#[derive(Debug, Default)]
pub struct StripOptions {
    /// Engine options applied to every file
    pub engine: Options,
    /// Destination of rewritten sources
    pub mode: WriteMode,
    /// Output raw JSON
    pub json: bool,
    /// Verbose output
    pub verbose: bool,
    /// Skip the summary table
    pub quiet: bool,
}

/// Per-file outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Calls were replaced and the result written
    Stripped,
    /// Calls would be replaced (dry run / check)
    WouldStrip,
    /// No targeted call found
    Unchanged,
    /// The file could not be read
    ReadFailed {
        /// Underlying error
        reason: String,
    },
    /// The file is not valid JavaScript; left untouched
    ParseFailed {
        /// Underlying error
        reason: String,
    },
    /// The result could not be written
    WriteFailed {
        /// Underlying error
        reason: String,
    },
}

impl FileStatus {
    /// Whether this status counts as a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ReadFailed { .. } | Self::ParseFailed { .. } | Self::WriteFailed { .. }
        )
    }
}

/// Result of processing one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File that was processed
    pub file: String,
    /// Number of replaced (or replaceable) calls
    pub calls: usize,
    /// What happened
    #[serde(flatten)]
    pub status: FileStatus,
    /// Rewritten text, kept only for `--stdout`
    #[serde(skip)]
    pub output: Option<String>,
}

/// Totals over all processed files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripSummary {
    /// Files processed
    pub files: usize,
    /// Files changed (or that would change)
    pub changed: usize,
    /// Calls replaced (or replaceable)
    pub calls: usize,
    /// Files that failed
    pub failed: usize,
}

impl StripSummary {
    /// Tally per-file reports.
    #[must_use]
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if report.status.is_failure() {
                summary.failed += 1;
            } else if report.calls > 0 {
                summary.changed += 1;
                summary.calls += report.calls;
            }
        }
        summary
    }

    /// Process exit code for this run.
    #[must_use]
    pub fn exit_code(&self, mode: &WriteMode) -> i32 {
        let check_failed = *mode == WriteMode::Check && self.changed > 0;
        i32::from(self.failed > 0 || check_failed)
    }
}

fn report(file: &Path, calls: usize, status: FileStatus) -> FileReport {
    FileReport {
        file: normalize_display_path(file),
        calls,
        status,
        output: None,
    }
}

fn write_result(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Read, transform and (depending on the mode) write one file.
fn strip_file(file: &SourceFile, options: &StripOptions) -> FileReport {
    let path = &file.path;
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return report(
                path,
                0,
                FileStatus::ReadFailed {
                    reason: e.to_string(),
                },
            )
        }
    };

    let outcome = match engine::process(&content, &options.engine) {
        Ok(o) => o,
        Err(e) => {
            return report(
                path,
                0,
                FileStatus::ParseFailed {
                    reason: e.to_string(),
                },
            )
        }
    };

    let calls = outcome.replaced.len();
    let changed = outcome.changed();
    let done = if changed {
        FileStatus::Stripped
    } else {
        FileStatus::Unchanged
    };

    match &options.mode {
        WriteMode::DryRun | WriteMode::Check => {
            let status = if changed {
                FileStatus::WouldStrip
            } else {
                FileStatus::Unchanged
            };
            report(path, calls, status)
        }
        WriteMode::Stdout => FileReport {
            output: Some(outcome.output),
            ..report(path, calls, done)
        },
        WriteMode::InPlace => {
            if !changed {
                return report(path, 0, done);
            }
            match fs::write(path, &outcome.output) {
                Ok(()) => report(path, calls, done),
                Err(e) => report(
                    path,
                    calls,
                    FileStatus::WriteFailed {
                        reason: e.to_string(),
                    },
                ),
            }
        }
        WriteMode::OutDir(dir) => {
            let relative = relative_destination(path, &file.input_root);
            let written = validate_output_path(&relative, dir)
                .and_then(|dest| write_result(&dest, &outcome.output).map_err(Into::into));
            match written {
                Ok(()) => report(path, calls, done),
                Err(e) => report(
                    path,
                    calls,
                    FileStatus::WriteFailed {
                        reason: e.to_string(),
                    },
                ),
            }
        }
    }
}

/// Apply the engine to every file.
///
/// Files are processed in parallel; each file is an independent invocation,
/// so one failure never affects the others. Reports keep the input order.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails or the output directory
/// cannot be created.
pub fn run_strip<W: Write>(
    files: &[SourceFile],
    options: &StripOptions,
    mut writer: W,
) -> Result<StripSummary> {
    if let WriteMode::OutDir(dir) = &options.mode {
        fs::create_dir_all(dir)?;
    }

    let hide_progress = options.json || options.mode == WriteMode::Stdout;
    let pb = crate::output::create_progress_bar(files.len() as u64, hide_progress);

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            let report = strip_file(file, options);
            pb.inc(1);
            report
        })
        .collect();
    pb.finish_and_clear();

    let summary = StripSummary::from_reports(&reports);

    if options.mode == WriteMode::Stdout {
        for report in &reports {
            if let Some(output) = &report.output {
                write!(writer, "{output}")?;
            } else if let FileStatus::ReadFailed { reason } | FileStatus::ParseFailed { reason } =
                &report.status
            {
                eprintln!("{} {}: {}", "Error:".red(), report.file, reason);
            }
        }
        return Ok(summary);
    }

    if options.json {
        let json = serde_json::json!({
            "files": reports,
            "summary": summary,
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(summary);
    }

    if options.mode.is_dry() {
        writeln!(
            writer,
            "{}",
            "[DRY-RUN] Logging calls that would be stripped:".yellow()
        )?;
    }

    for report in &reports {
        print_report(&mut writer, report, options.verbose)?;
    }

    if !options.quiet {
        crate::output::print_strip_summary(&mut writer, &summary, options.mode.is_dry())?;
    }

    Ok(summary)
}

fn print_report<W: Write>(writer: &mut W, report: &FileReport, verbose: bool) -> Result<()> {
    match &report.status {
        FileStatus::Stripped => writeln!(
            writer,
            "  {} {} ({} removed)",
            "Stripped:".green(),
            report.file,
            report.calls
        )?,
        FileStatus::WouldStrip => writeln!(
            writer,
            "  Would strip {} call(s) in {}",
            report.calls, report.file
        )?,
        FileStatus::Unchanged => {
            if verbose {
                writeln!(writer, "  {} {}", "Unchanged:".dimmed(), report.file)?;
            }
        }
        FileStatus::ReadFailed { reason } | FileStatus::WriteFailed { reason } => {
            writeln!(writer, "  {} {}: {}", "Skip:".yellow(), report.file, reason)?;
        }
        FileStatus::ParseFailed { reason } => {
            writeln!(
                writer,
                "  {} {}: {}",
                "Parse error:".red(),
                report.file,
                reason
            )?;
        }
    }
    Ok(())
}
