//! Batch partitioning for manifest names.
//!
//! This module splits an ordered sequence of names into fixed-capacity
//! groups and gives each group a 1-based ordinal and a destination folder
//! name.
//!
//! # Examples
//!
//! ```
//! use batchmover::batch::{BatchCapacity, partition};
//!
//! let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
//! let capacity = BatchCapacity::new(2).unwrap();
//! let batches = partition(&names, capacity, "batch_");
//!
//! assert_eq!(batches.len(), 2);
//! assert_eq!(batches[0].folder_name, "batch_1");
//! assert_eq!(batches[1].names, vec!["c".to_string()]);
//! ```
use serde::Serialize;

/// Smallest accepted batch capacity.
pub const MIN_CAPACITY: usize = 1;
/// Largest accepted batch capacity.
pub const MAX_CAPACITY: usize = 500;
/// Folder prefix used when none is configured.
pub const DEFAULT_FOLDER_PREFIX: &str = "batch_";

/// Number of files placed into each batch folder.
///
/// Always within `MIN_CAPACITY..=MAX_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchCapacity(usize);

impl BatchCapacity {
    /// Returns `None` when `size` is outside the accepted range.
    pub fn new(size: usize) -> Option<Self> {
        (MIN_CAPACITY..=MAX_CAPACITY)
            .contains(&size)
            .then_some(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// A group of names destined for one batch folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    /// 1-based position of this batch in creation order.
    pub ordinal: usize,
    /// Name of the sub-folder the batch is moved into.
    pub folder_name: String,
    /// Manifest names assigned to this batch, in manifest order.
    pub names: Vec<String>,
}

impl Batch {
    fn open(ordinal: usize, folder_prefix: &str, capacity: BatchCapacity) -> Self {
        Self {
            ordinal,
            folder_name: folder_name(folder_prefix, ordinal),
            names: Vec::with_capacity(capacity.get()),
        }
    }
}

/// Builds the folder name for a batch ordinal.
pub fn folder_name(prefix: &str, ordinal: usize) -> String {
    format!("{}{}", prefix, ordinal)
}

/// Splits `names` into batches of `capacity` names each.
///
/// Every batch except possibly the last holds exactly `capacity` names.
/// Ordinals start at 1 and increase without gaps. An empty input yields no
/// batches.
///
/// # Arguments
///
/// * `names` - Ordered manifest names
/// * `capacity` - Names per batch
/// * `folder_prefix` - Prefix for the derived folder names
pub fn partition(names: &[String], capacity: BatchCapacity, folder_prefix: &str) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();

    for name in names {
        let needs_new_batch = match batches.last() {
            Some(current) => current.names.len() >= capacity.get(),
            None => true,
        };
        if needs_new_batch {
            batches.push(Batch::open(batches.len() + 1, folder_prefix, capacity));
        }
        if let Some(current) = batches.last_mut() {
            current.names.push(name.clone());
        }
    }

    batches
}
