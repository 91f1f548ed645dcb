//! Command-line interface module for batchmover.
//!
//! This module handles all CLI-related functionality including:
//! - Argument definitions
//! - Locating the manifest and the files to move
//! - Resolving run settings from flags, config and prompts
//! - Orchestrating the batch moves and reporting on them

use crate::batch::partition;
use crate::batch_mover::{BatchMover, MoveEvent, MoveStatus};
use crate::config::{BatchConfig, ConfigError};
use crate::manifest::{self, ManifestError};
use crate::output::{Notice, OutputFormatter};
use crate::prompt::{Prompter, ValidationError};
use crate::report::RunReport;
use crate::settings::{BatchSettings, SettingsError, SettingsOverrides};
use crate::workspace::Workspace;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Whether files are actually moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Report intended moves only.
    #[default]
    On,
    /// Move the files.
    Off,
}

impl TestMode {
    pub fn is_on(self) -> bool {
        self == TestMode::On
    }
}

/// Move files named in a CSV manifest into numbered batch folders.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "batchmover")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Folder containing the manifest and the files to batch
    #[arg(long = "folder-path", alias = "folder_path", value_name = "PATH")]
    pub folder_path: Option<PathBuf>,

    /// In test mode no files are moved
    #[arg(
        long = "test-mode",
        alias = "test_mode",
        value_enum,
        ignore_case = true,
        default_value_t = TestMode::On
    )]
    pub test_mode: TestMode,

    /// Files per batch folder (1-500); prompted for if not given
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Manifest column letter (A-Z); prompted for if not given
    #[arg(long)]
    pub column: Option<String>,

    /// Whether the manifest has a header row (Y/N); prompted for if not given
    #[arg(long)]
    pub header: Option<String>,

    /// Extension of the files to move; prompted for if not given
    #[arg(long)]
    pub extension: Option<String>,

    /// Configuration file (default: .batchmoverrc.toml in the folder)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            batch_size: self.batch_size,
            column: self.column.clone(),
            has_header: self.header.clone(),
            extension: self.extension.clone(),
        }
    }
}

/// Errors that abort a run.
#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Manifest(ManifestError),
    Validation(ValidationError),
    /// The JSON report could not be written.
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "{}", e),
            RunError::Manifest(e) => write!(f, "{}", e),
            RunError::Validation(e) => write!(f, "{}", e),
            RunError::Report { path, source } => {
                write!(f, "Failed to write report {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RunError {}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

impl From<ManifestError> for RunError {
    fn from(e: ManifestError) -> Self {
        RunError::Manifest(e)
    }
}

impl From<ValidationError> for RunError {
    fn from(e: ValidationError) -> Self {
        RunError::Validation(e)
    }
}

impl From<SettingsError> for RunError {
    fn from(e: SettingsError) -> Self {
        match e {
            SettingsError::Config(e) => RunError::Config(e),
            SettingsError::Validation(e) => RunError::Validation(e),
        }
    }
}

/// Runs one batching pass over the folder named in `args`.
///
/// Questions not answered by flags or the configuration file are asked on
/// `prompt_output` and answered from `input`.
///
/// # Arguments
///
/// * `args` - Parsed command-line arguments
/// * `input` - Source of interactive answers (stdin in the binary)
/// * `prompt_output` - Where questions are written (stdout in the binary)
///
/// # Examples
///
/// ```no_run
/// use batchmover::cli::{Args, TestMode, run_cli};
/// use std::path::PathBuf;
///
/// let args = Args {
///     folder_path: Some(PathBuf::from("/photos/shoot")),
///     test_mode: TestMode::On,
///     ..Default::default()
/// };
/// let stdin = std::io::stdin();
/// match run_cli(&args, stdin.lock(), std::io::stdout()) {
///     Ok(report) => println!("{} names processed", report.counts.total()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli<R: BufRead, W: Write>(
    args: &Args,
    input: R,
    prompt_output: W,
) -> Result<RunReport, RunError> {
    let dry_run = args.test_mode.is_on();
    let started_at = chrono::Utc::now();

    OutputFormatter::info(&format!(
        "Starting batchmover - test mode is {}",
        if dry_run { "on" } else { "off" }
    ));

    let folder = args.folder_path.as_deref().ok_or(ConfigError::MissingFolder)?;
    let workspace = Workspace::open(folder)?;
    let config = BatchConfig::load(args.config.as_deref(), workspace.root())?;
    let pattern = config.manifest_pattern()?;

    let manifest_path = workspace.find_manifest(&pattern)?;
    OutputFormatter::plain(&format!(
        "Found manifest file: {}",
        manifest_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    ));

    let other_files = workspace
        .media_files(&pattern)
        .map_err(|e| ManifestError::Read {
            path: workspace.root().to_path_buf(),
            reason: e.to_string(),
        })?;
    OutputFormatter::plain(&format!(
        "Found {} other files to be batch moved\n",
        other_files.len()
    ));

    let mut prompter = Prompter::new(input, prompt_output);
    let settings = BatchSettings::resolve(&args.overrides(), &config, &mut prompter, dry_run)?;

    let names = manifest::read_names(&manifest_path, settings.column, settings.has_header)?;
    if names.is_empty() {
        OutputFormatter::warning(&format!(
            "Column {} of the manifest contains no names",
            settings.column
        ));
    }

    let batches = partition(&names, settings.capacity, &settings.folder_prefix);

    let progress = (!dry_run && !names.is_empty())
        .then(|| OutputFormatter::create_progress_bar(names.len() as u64));
    let records = BatchMover::new(&workspace, &settings).run(&batches, |event| {
        report_event(&event, progress.as_ref())
    });
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let report = RunReport::new(
        started_at,
        workspace.root().to_path_buf(),
        manifest_path,
        settings,
        batches.len(),
        records,
    );

    OutputFormatter::summary_table(&report);

    if dry_run {
        OutputFormatter::dry_run_notice("No files were modified.");
        OutputFormatter::plain(&format!(
            "Run 'batchmover --folder-path {} --test-mode off' to move the files.",
            workspace.root().display()
        ));
    } else if report.has_failures() {
        OutputFormatter::error("Some files could not be moved. Please review errors above.");
    } else {
        OutputFormatter::success("Batching complete!");
    }

    if let Some(path) = &args.report {
        report.save(path).map_err(|e| RunError::Report {
            path: path.clone(),
            source: e,
        })?;
        OutputFormatter::success(&format!("Report saved to {}", path.display()));
    }

    Ok(report)
}

/// Prints one mover event, keeping the progress bar intact.
fn report_event(event: &MoveEvent<'_>, progress: Option<&ProgressBar>) {
    if let Some(notice) = notice_for(event) {
        above_progress(progress, || OutputFormatter::notice(&notice));
    }
    if let (MoveEvent::Processed(record), Some(pb)) = (event, progress) {
        pb.set_message(record.file_name.clone());
        pb.inc(1);
    }
}

/// The line printed for `event`, if any. Moved files print nothing.
fn notice_for(event: &MoveEvent<'_>) -> Option<Notice> {
    match event {
        MoveEvent::BatchOpened {
            folder_error: Some(e),
            ..
        } => Some(Notice::Error(e.to_string())),
        MoveEvent::BatchOpened { batch, .. } => Some(Notice::Header(format!(
            "Batch {} -> {}/",
            batch.ordinal, batch.folder_name
        ))),
        MoveEvent::Processed(record) => match &record.status {
            MoveStatus::Moved => None,
            MoveStatus::WouldMove => Some(Notice::DryRun(format!(
                "Would move '{}' to '{}'",
                record.source.display(),
                record.destination.display()
            ))),
            MoveStatus::Missing => Some(Notice::Warning(format!(
                "Couldn't find file '{}'",
                record.file_name
            ))),
            MoveStatus::Failed { reason } => Some(Notice::Error(reason.clone())),
        },
    }
}

fn above_progress<F: FnOnce()>(progress: Option<&ProgressBar>, print: F) {
    match progress {
        Some(pb) => pb.suspend(print),
        None => print(),
    }
}
