//! Run configuration.
//!
//! Default answers for the interactive questions can be stored in a TOML
//! file so repeated runs over similar folders need no typing. Every key is
//! optional; anything missing is asked for at run time.
//!
//! # Configuration File Format
//!
//! ```toml
//! [batch]
//! size = 50
//! folder_prefix = "batch_"
//!
//! [manifest]
//! column = "A"
//! has_header = true
//! pattern = "*.csv"
//!
//! [files]
//! extension = "jpg"
//! ```

use crate::batch::{DEFAULT_FOLDER_PREFIX, folder_name};
use crate::workspace::is_plain_file_name;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-folder configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".batchmoverrc.toml";
/// Manifest glob used when none is configured.
pub const DEFAULT_MANIFEST_PATTERN: &str = "*.csv";

/// Errors caused by invalid invocation or configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// No folder was given on the command line.
    MissingFolder,
    /// The folder does not exist or is not a directory.
    FolderNotFound(PathBuf),
    /// The file extension is empty.
    EmptyExtension,
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// The batch folder prefix would not give a plain folder name.
    InvalidFolderPrefix(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingFolder => write!(
                f,
                "No folder argument provided. Please add --folder-path <PATH> when running."
            ),
            ConfigError::FolderNotFound(path) => {
                write!(f, "No folder path exists: {}", path.display())
            }
            ConfigError::EmptyExtension => write!(f, "Must provide a file extension type."),
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid manifest pattern '{}'", pattern)
            }
            ConfigError::InvalidFolderPrefix(prefix) => write!(
                f,
                "Invalid folder prefix '{}': must not contain path separators",
                prefix
            ),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub batch: BatchSection,
    #[serde(default)]
    pub manifest: ManifestSection,
    #[serde(default)]
    pub files: FilesSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSection {
    /// Files per batch folder.
    #[serde(default)]
    pub size: Option<usize>,
    /// Prefix for batch folder names. Defaults to `batch_`.
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            size: None,
            folder_prefix: default_folder_prefix(),
        }
    }
}

fn default_folder_prefix() -> String {
    DEFAULT_FOLDER_PREFIX.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSection {
    /// Column letter holding the file names.
    #[serde(default)]
    pub column: Option<String>,
    /// Whether the first row is a header.
    #[serde(default)]
    pub has_header: Option<bool>,
    /// Glob used to recognise the manifest file.
    #[serde(default = "default_manifest_pattern")]
    pub pattern: String,
}

impl Default for ManifestSection {
    fn default() -> Self {
        Self {
            column: None,
            has_header: None,
            pattern: default_manifest_pattern(),
        }
    }
}

fn default_manifest_pattern() -> String {
    DEFAULT_MANIFEST_PATTERN.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesSection {
    /// Extension of the files to move, without the dot.
    #[serde(default)]
    pub extension: Option<String>,
}

impl BatchConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.batchmoverrc.toml` in `folder`
    /// 3. Look for `~/.config/batchmover/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read,
    /// if any file found is not valid TOML, or if its folder prefix is invalid.
    pub fn load(config_path: Option<&Path>, folder: &Path) -> Result<Self, ConfigError> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::load_with_home(config_path, folder, home.as_deref())
    }

    /// Same as [`BatchConfig::load`] with an explicit home directory.
    /// `None` skips the home lookup.
    pub fn load_with_home(
        config_path: Option<&Path>,
        folder: &Path,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            let local_config = folder.join(LOCAL_CONFIG_FILE);
            let home_config =
                home.map(|h| h.join(".config").join("batchmover").join("config.toml"));

            if local_config.exists() {
                Self::load_from_file(&local_config)?
            } else if let Some(home_config) = home_config.filter(|p| p.exists()) {
                Self::load_from_file(&home_config)?
            } else {
                Self::default()
            }
        };

        config.validate()
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Checks that batch folders named from the prefix stay directly inside
    /// the working folder.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFolderPrefix` otherwise.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !is_plain_file_name(&folder_name(&self.batch.folder_prefix, 1)) {
            return Err(ConfigError::InvalidFolderPrefix(
                self.batch.folder_prefix.clone(),
            ));
        }
        Ok(self)
    }

    /// Compiles the manifest glob.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlobPattern` if the pattern is malformed.
    pub fn manifest_pattern(&self) -> Result<Pattern, ConfigError> {
        Pattern::new(&self.manifest.pattern)
            .map_err(|_| ConfigError::InvalidGlobPattern(self.manifest.pattern.clone()))
    }
}
