use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use crate::commands::StripSummary;
use crate::matcher::TargetSpec;

/// Create a progress bar with file count.
///
/// In test mode, or when `hidden` is set (JSON/stdout output), returns a
/// hidden progress bar to avoid polluting output.
#[must_use]
pub fn create_progress_bar(total_files: u64, hidden: bool) -> ProgressBar {
    if cfg!(test) || hidden {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("rewriting...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the resolved targets as a single dimmed line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_targets(writer: &mut impl Write, targets: &TargetSpec) -> std::io::Result<()> {
    let list = targets
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(writer, "{} {}", "Targets:".cyan().bold(), list.dimmed())
}

/// Print the strip summary table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_strip_summary(
    writer: &mut impl Write,
    summary: &StripSummary,
    dry_run: bool,
) -> std::io::Result<()> {
    let changed_label = if dry_run { "Would change" } else { "Changed" };
    let calls_label = if dry_run {
        "Calls to strip"
    } else {
        "Calls stripped"
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Files", changed_label, calls_label, "Failed"]);

    let failed_color = if summary.failed == 0 {
        Color::Green
    } else {
        Color::Red
    };
    table.add_row(vec![
        Cell::new(summary.files),
        Cell::new(summary.changed),
        Cell::new(summary.calls),
        Cell::new(summary.failed).fg(failed_color),
    ]);

    writeln!(writer)?;
    writeln!(writer, "{table}")?;
    Ok(())
}
