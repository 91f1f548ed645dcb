/// Moves manifest files into their batch folders.
///
/// Each name is looked up as `name.extension` in the workspace root. Found
/// files are moved into the folder of the batch they were assigned to (or
/// only reported, in dry-run mode). Missing files and failed moves are
/// recorded and processing continues; nothing is rolled back.
use crate::batch::Batch;
use crate::settings::BatchSettings;
use crate::workspace::Workspace;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while moving a single file.
#[derive(Debug)]
pub enum MoveError {
    /// Failed to create a batch directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its batch directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// A file with the same name is already in the batch directory.
    DestinationExists { destination: PathBuf },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DestinationExists { destination } => {
                write!(f, "Destination already exists: {}", destination.display())
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Result type for move operations.
pub type MoveResult<T> = Result<T, MoveError>;

/// What happened to one manifest name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveStatus {
    Moved,
    /// Dry-run: the file would have been moved.
    WouldMove,
    /// No `name.extension` file exists directly in the folder. Names that
    /// are not a plain file name always end up here.
    Missing,
    Failed { reason: String },
}

/// The outcome for one manifest name.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub name: String,
    pub file_name: String,
    /// Ordinal of the batch the name was assigned to.
    pub batch: usize,
    pub folder: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(flatten)]
    pub status: MoveStatus,
}

/// Progress notifications emitted while a run is in progress.
#[derive(Debug)]
pub enum MoveEvent<'a> {
    /// A batch was opened. `folder_error` is set if its folder could not be
    /// created.
    BatchOpened {
        batch: &'a Batch,
        folder_error: Option<&'a MoveError>,
    },
    /// A manifest name was processed.
    Processed(&'a MoveRecord),
}

/// Moves the files of a batch plan.
pub struct BatchMover<'a> {
    workspace: &'a Workspace,
    settings: &'a BatchSettings,
}

impl<'a> BatchMover<'a> {
    pub fn new(workspace: &'a Workspace, settings: &'a BatchSettings) -> Self {
        Self {
            workspace,
            settings,
        }
    }

    /// Processes `batches` in order and returns one record per name.
    ///
    /// In live mode a batch folder is created when the batch is opened, so
    /// a batch whose files are all missing still gets its folder. In dry-run
    /// mode the filesystem is never touched.
    ///
    /// # Arguments
    ///
    /// * `batches` - The batch plan, in ordinal order
    /// * `observe` - Called for every batch opened and every name processed
    pub fn run<F>(&self, batches: &[Batch], mut observe: F) -> Vec<MoveRecord>
    where
        F: FnMut(MoveEvent<'_>),
    {
        let mut records = Vec::new();

        for batch in batches {
            let batch_dir = self.workspace.root().join(&batch.folder_name);
            let folder_error = if self.settings.dry_run {
                None
            } else {
                Self::ensure_batch_dir(&batch_dir).err()
            };
            observe(MoveEvent::BatchOpened {
                batch,
                folder_error: folder_error.as_ref(),
            });

            for name in &batch.names {
                let record = self.process(batch, &batch_dir, name, folder_error.as_ref());
                observe(MoveEvent::Processed(&record));
                records.push(record);
            }
        }

        records
    }

    fn process(
        &self,
        batch: &Batch,
        batch_dir: &Path,
        name: &str,
        folder_error: Option<&MoveError>,
    ) -> MoveRecord {
        let file_name = self.settings.file_name_for(name);
        let located = self.workspace.locate(&file_name);
        let source = located
            .clone()
            .unwrap_or_else(|| self.workspace.root().join(&file_name));
        // Same rule as `move_into`: only the final component is kept.
        let destination = batch_dir.join(Path::new(&file_name).file_name().unwrap_or_default());

        let status = match located {
            None => MoveStatus::Missing,
            Some(_) if self.settings.dry_run => MoveStatus::WouldMove,
            Some(_) => match folder_error {
                Some(e) => MoveStatus::Failed {
                    reason: e.to_string(),
                },
                None => match Self::move_into(&source, batch_dir) {
                    Ok(_) => MoveStatus::Moved,
                    Err(e) => MoveStatus::Failed {
                        reason: e.to_string(),
                    },
                },
            },
        };

        MoveRecord {
            name: name.to_string(),
            file_name,
            batch: batch.ordinal,
            folder: batch.folder_name.clone(),
            source,
            destination,
            status,
        }
    }

    /// Creates `batch_dir` unless it already is a directory.
    pub fn ensure_batch_dir(batch_dir: &Path) -> MoveResult<()> {
        if batch_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir(batch_dir).map_err(|e| MoveError::DirectoryCreationFailed {
            path: batch_dir.to_path_buf(),
            source: e,
        })
    }

    /// Moves `file_path` into `batch_dir`, keeping its file name.
    ///
    /// Returns the new path. An existing file at the destination is never
    /// overwritten.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use batchmover::batch_mover::BatchMover;
    /// use std::path::Path;
    ///
    /// let result = BatchMover::move_into(
    ///     Path::new("/photos/IMG_001.jpg"),
    ///     Path::new("/photos/batch_1"),
    /// );
    ///
    /// match result {
    ///     Ok(path) => println!("Moved to {}", path.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_into(file_path: &Path, batch_dir: &Path) -> MoveResult<PathBuf> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| MoveError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: batch_dir.to_path_buf(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination_path = batch_dir.join(file_name);
        if destination_path.exists() {
            return Err(MoveError::DestinationExists {
                destination: destination_path,
            });
        }

        fs::rename(file_path, &destination_path).map_err(|e| MoveError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination_path.clone(),
            source_error: e,
        })?;

        Ok(destination_path)
    }
}
