//! Manifest reading.
//!
//! A manifest is a comma-separated file in the working folder. One of its
//! columns holds bare file names (no extension) in the order they should be
//! batched.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Errors that can occur while locating or reading the manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// No manifest file was found in the working folder.
    NotFound { folder: PathBuf, pattern: String },
    /// A row is too short to contain the requested column.
    ColumnOutOfRange {
        /// Zero-based row index within the manifest.
        row: usize,
        column: Column,
        /// Number of cells the row actually has.
        width: usize,
    },
    /// The manifest could not be opened or decoded.
    Read { path: PathBuf, reason: String },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::NotFound { folder, pattern } => write!(
                f,
                "No manifest file matching '{}' found in {}",
                pattern,
                folder.display()
            ),
            ManifestError::ColumnOutOfRange { row, column, width } => write!(
                f,
                "Row {} has {} column(s); column {} is out of range",
                row + 1,
                width,
                column
            ),
            ManifestError::Read { path, reason } => {
                write!(f, "Failed to read manifest {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ManifestError {}

/// Result type for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// A spreadsheet column, addressed by letter `A`..=`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column(usize);

impl Column {
    /// Parses a single column letter, ignoring case.
    ///
    /// ```
    /// use batchmover::manifest::Column;
    ///
    /// assert_eq!(Column::from_letter("a").map(|c| c.index()), Some(0));
    /// assert_eq!(Column::from_letter("Z").map(|c| c.index()), Some(25));
    /// assert!(Column::from_letter("AA").is_none());
    /// ```
    pub fn from_letter(letter: &str) -> Option<Self> {
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some(Self((c.to_ascii_lowercase() as u8 - b'a') as usize))
            }
            _ => None,
        }
    }

    /// Zero-based index of this column.
    pub fn index(self) -> usize {
        self.0
    }

    pub fn letter(self) -> char {
        (b'A' + self.0 as u8) as char
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Reads the names in `column` of the manifest at `path`.
///
/// Row 0 is skipped when `has_header` is set. Empty cells are skipped; all
/// other cells are returned verbatim, in file order.
///
/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be opened or parsed and
/// `ManifestError::ColumnOutOfRange` if a data row lacks the column.
pub fn read_names(path: &Path, column: Column, has_header: bool) -> ManifestResult<Vec<String>> {
    let file = File::open(path).map_err(|e| ManifestError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    read_names_from(BufReader::new(file), column, has_header).map_err(|e| match e {
        ManifestError::Read { reason, .. } => ManifestError::Read {
            path: path.to_path_buf(),
            reason,
        },
        other => other,
    })
}

/// Same as [`read_names`] but over any reader.
///
/// Every line is one row. A blank line is a row with no cells, so it counts
/// towards row numbering and fails the column check unless it is the
/// skipped header row.
pub fn read_names_from<R: Read>(
    mut reader: R,
    column: Column,
    has_header: bool,
) -> ManifestResult<Vec<String>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| ManifestError::Read {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;

    let mut names = Vec::new();

    for (row, line) in content.lines().enumerate() {
        if row == 0 && has_header {
            continue;
        }

        let record = parse_row(line)?;
        let cell = record
            .get(column.index())
            .ok_or(ManifestError::ColumnOutOfRange {
                row,
                column,
                width: record.len(),
            })?;

        if !cell.is_empty() {
            names.push(cell.to_string());
        }
    }

    Ok(names)
}

/// Splits one manifest line into cells. A blank line has no cells.
fn parse_row(line: &str) -> ManifestResult<csv::StringRecord> {
    if line.is_empty() {
        return Ok(csv::StringRecord::new());
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'|')
        .from_reader(line.as_bytes());

    match csv_reader.records().next() {
        Some(record) => record.map_err(|e| ManifestError::Read {
            path: PathBuf::new(),
            reason: e.to_string(),
        }),
        None => Ok(csv::StringRecord::new()),
    }
}
