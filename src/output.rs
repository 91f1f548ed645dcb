//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored output,
//! progress tracking, and the end-of-run summary table.

use crate::report::RunReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// One line of per-file or per-batch output during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Header(String),
    DryRun(String),
    Warning(String),
    Error(String),
}

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Progress bars for live moves
/// - Per-batch summary tables
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use batchmover::output::OutputFormatter;
    /// OutputFormatter::error("No manifest file found");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints `notice` with the style of its kind.
    pub fn notice(notice: &Notice) {
        match notice {
            Notice::Header(message) => Self::header(message),
            Notice::DryRun(message) => Self::dry_run_notice(message),
            Notice::Warning(message) => Self::warning(message),
            Notice::Error(message) => Self::error(message),
        }
    }

    /// Creates and returns a progress bar for file moves.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use batchmover::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_with_message("Completed!");
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints a table of outcomes per batch folder, followed by totals.
    pub fn summary_table(report: &RunReport) {
        Self::header("SUMMARY");

        let per_batch = report.batch_counts();
        let done_label = if report.settings.dry_run {
            "Would move"
        } else {
            "Moved"
        };

        let folder_width = per_batch
            .values()
            .map(|(folder, _)| folder.len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Folder" width

        println!(
            "{:<width$} | {:>10} | {:>7} | {:>6}",
            "Folder".bold(),
            done_label.bold(),
            "Missing".bold(),
            "Failed".bold(),
            width = folder_width
        );
        println!("{}", "-".repeat(folder_width + 34));

        for (folder, counts) in per_batch.values() {
            let done = counts.moved + counts.would_move;
            println!(
                "{:<width$} | {:>10} | {:>7} | {:>6}",
                folder,
                done.to_string().green(),
                missing_cell(counts.missing),
                failed_cell(counts.failed),
                width = folder_width
            );
        }

        let totals = report.counts;
        println!("{}", "-".repeat(folder_width + 34));
        println!(
            "{:<width$} | {:>10} | {:>7} | {:>6}",
            "Total".bold(),
            (totals.moved + totals.would_move).to_string().green().bold(),
            missing_cell(totals.missing),
            failed_cell(totals.failed),
            width = folder_width
        );
        println!(
            "{} {} across {} {}",
            totals.total(),
            if totals.total() == 1 { "name" } else { "names" },
            report.batch_count,
            if report.batch_count == 1 {
                "batch"
            } else {
                "batches"
            }
        );
    }
}

fn missing_cell(count: usize) -> ColoredString {
    if count == 0 {
        count.to_string().normal()
    } else {
        count.to_string().yellow()
    }
}

fn failed_cell(count: usize) -> ColoredString {
    if count == 0 {
        count.to_string().normal()
    } else {
        count.to_string().red()
    }
}
