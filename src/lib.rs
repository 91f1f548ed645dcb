//! batchmover - Move files named in a spreadsheet into numbered batch folders
//!
//! This library reads file names from one column of a CSV manifest, splits
//! them into fixed-size batches, and moves the matching files of a folder
//! into `batch_1`, `batch_2`, ... sub-folders, with a dry-run mode that only
//! reports what would happen.

pub mod batch;
pub mod batch_mover;
pub mod cli;
pub mod config;
pub mod manifest;
pub mod output;
pub mod prompt;
pub mod report;
pub mod settings;
pub mod workspace;

pub use batch::{Batch, BatchCapacity, partition};
pub use batch_mover::{BatchMover, MoveError, MoveRecord, MoveStatus};
pub use config::{BatchConfig, ConfigError};
pub use manifest::{Column, ManifestError};
pub use prompt::ValidationError;
pub use report::RunReport;
pub use settings::BatchSettings;
pub use workspace::Workspace;

pub use cli::{Args, RunError, TestMode, run_cli};
