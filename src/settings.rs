//! Settings for a single run.
//!
//! Each value is taken from the first source that has it: command-line
//! flags, then the configuration file, then an interactive prompt.

use crate::batch::BatchCapacity;
use crate::config::{BatchConfig, ConfigError};
use crate::manifest::Column;
use crate::prompt::{self, Prompter, ValidationError};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Fully validated settings for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSettings {
    pub capacity: BatchCapacity,
    /// Zero-based manifest column index.
    #[serde(serialize_with = "serialize_column")]
    pub column: Column,
    pub has_header: bool,
    /// Extension without a leading dot, never empty.
    pub extension: String,
    pub folder_prefix: String,
    pub dry_run: bool,
}

fn serialize_column<S: serde::Serializer>(column: &Column, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_char(column.letter())
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub batch_size: Option<usize>,
    pub column: Option<String>,
    pub has_header: Option<String>,
    pub extension: Option<String>,
}

/// Errors raised while resolving settings.
#[derive(Debug)]
pub enum SettingsError {
    Config(ConfigError),
    Validation(ValidationError),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Config(e) => write!(f, "{}", e),
            SettingsError::Validation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        SettingsError::Config(e)
    }
}

impl From<ValidationError> for SettingsError {
    fn from(e: ValidationError) -> Self {
        SettingsError::Validation(e)
    }
}

/// Strips one leading `.` from `extension`.
///
/// # Errors
///
/// Returns `ConfigError::EmptyExtension` if nothing is left.
pub fn normalize_extension(extension: &str) -> Result<String, ConfigError> {
    let trimmed = extension.trim();
    let ext = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if ext.is_empty() {
        return Err(ConfigError::EmptyExtension);
    }
    Ok(ext.to_string())
}

impl BatchSettings {
    /// Resolves every setting, prompting only for those neither `overrides`
    /// nor `config` provide. Questions are asked in a fixed order: batch
    /// size, column, header, extension.
    pub fn resolve<R: BufRead, W: Write>(
        overrides: &SettingsOverrides,
        config: &BatchConfig,
        prompter: &mut Prompter<R, W>,
        dry_run: bool,
    ) -> Result<Self, SettingsError> {
        let capacity = match overrides.batch_size.or(config.batch.size) {
            Some(size) => prompt::batch_size(size)?,
            None => prompter.ask_batch_size()?,
        };

        let column = match overrides
            .column
            .as_deref()
            .or(config.manifest.column.as_deref())
        {
            Some(letter) => prompt::parse_column(letter)?,
            None => prompter.ask_column()?,
        };

        let has_header = match overrides.has_header.as_deref() {
            Some(answer) => prompt::parse_yes_no(answer)?,
            None => match config.manifest.has_header {
                Some(flag) => flag,
                None => prompter.ask_has_header(column)?,
            },
        };

        let raw_extension = match overrides
            .extension
            .as_deref()
            .or(config.files.extension.as_deref())
        {
            Some(ext) => ext.to_string(),
            None => prompter.ask_extension()?,
        };
        let extension = normalize_extension(&raw_extension)?;

        Ok(Self {
            capacity,
            column,
            has_header,
            extension,
            folder_prefix: config.batch.folder_prefix.clone(),
            dry_run,
        })
    }

    /// File name expected on disk for a manifest `name`.
    pub fn file_name_for(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension)
    }
}
