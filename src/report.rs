//! Run summary.
//!
//! Collects the outcome of every manifest name so the run can be summarised
//! on the console and, on request, saved as JSON.

use crate::batch_mover::{MoveRecord, MoveStatus};
use crate::settings::BatchSettings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome counts for a run or a single batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub moved: usize,
    pub would_move: usize,
    pub missing: usize,
    pub failed: usize,
}

impl Counts {
    fn add(&mut self, status: &MoveStatus) {
        match status {
            MoveStatus::Moved => self.moved += 1,
            MoveStatus::WouldMove => self.would_move += 1,
            MoveStatus::Missing => self.missing += 1,
            MoveStatus::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.moved + self.would_move + self.missing + self.failed
    }
}

/// Everything a run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of when the run started.
    pub started_at: String,
    pub folder: PathBuf,
    pub manifest: PathBuf,
    pub settings: BatchSettings,
    pub batch_count: usize,
    pub counts: Counts,
    pub records: Vec<MoveRecord>,
}

impl RunReport {
    pub fn new(
        started_at: chrono::DateTime<chrono::Utc>,
        folder: PathBuf,
        manifest: PathBuf,
        settings: BatchSettings,
        batch_count: usize,
        records: Vec<MoveRecord>,
    ) -> Self {
        let mut counts = Counts::default();
        for record in &records {
            counts.add(&record.status);
        }
        Self {
            started_at: started_at.to_rfc3339(),
            folder,
            manifest,
            settings,
            batch_count,
            counts,
            records,
        }
    }

    /// Counts per batch folder, keyed by ordinal.
    pub fn batch_counts(&self) -> BTreeMap<usize, (String, Counts)> {
        let mut per_batch: BTreeMap<usize, (String, Counts)> = BTreeMap::new();
        for record in &self.records {
            per_batch
                .entry(record.batch)
                .or_insert_with(|| (record.folder.clone(), Counts::default()))
                .1
                .add(&record.status);
        }
        per_batch
    }

    /// True if any move failed.
    pub fn has_failures(&self) -> bool {
        self.counts.failed > 0
    }

    /// Writes this report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}
