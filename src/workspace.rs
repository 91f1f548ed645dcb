//! Input resolution for the working folder.
//!
//! Finds the manifest and lists the other visible files a run can move.

use crate::config::ConfigError;
use crate::manifest::{ManifestError, ManifestResult};
use glob::Pattern;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// The folder a run operates on.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Opens `folder` as a workspace.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FolderNotFound` if the path does not exist or
    /// is not a directory.
    pub fn open(folder: &Path) -> Result<Self, ConfigError> {
        if !folder.is_dir() {
            return Err(ConfigError::FolderNotFound(folder.to_path_buf()));
        }
        Ok(Self {
            root: folder.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the first visible file matching `pattern`, in name order.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` when no file matches, and
    /// `ManifestError::Read` when the folder cannot be listed.
    pub fn find_manifest(&self, pattern: &Pattern) -> ManifestResult<PathBuf> {
        let files = self.visible_files().map_err(|e| ManifestError::Read {
            path: self.root.clone(),
            reason: e.to_string(),
        })?;

        files
            .into_iter()
            .find(|path| matches_name(pattern, path))
            .ok_or_else(|| ManifestError::NotFound {
                folder: self.root.clone(),
                pattern: pattern.as_str().to_string(),
            })
    }

    /// Lists visible files that do not match the manifest `pattern`.
    pub fn media_files(&self, pattern: &Pattern) -> std::io::Result<Vec<PathBuf>> {
        Ok(self
            .visible_files()?
            .into_iter()
            .filter(|path| !matches_name(pattern, path))
            .collect())
    }

    /// Path of `file_name` if it is a regular file directly in the root.
    ///
    /// Names that are not a single plain component (`../x`, `/abs`,
    /// `sub/a`) are never found.
    pub fn locate(&self, file_name: &str) -> Option<PathBuf> {
        if !is_plain_file_name(file_name) {
            return None;
        }
        let path = self.root.join(file_name);
        path.is_file().then_some(path)
    }

    /// Regular files directly in the root whose names do not start with `.`,
    /// sorted by name.
    fn visible_files(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.root)?.flatten() {
            if let Ok(file_type) = entry.file_type()
                && file_type.is_file()
                && !entry.file_name().to_string_lossy().starts_with('.')
            {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }
}

/// True if `name` is exactly one normal path component.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.chars().any(std::path::is_separator) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn matches_name(pattern: &Pattern, path: &Path) -> bool {
    path.file_name()
        .map(|name| pattern.matches(&name.to_string_lossy()))
        .unwrap_or(false)
}
