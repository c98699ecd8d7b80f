use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::config::Config;

/// Width of the `YYYYMMDDHHMM` timestamp embedded in snapshot filenames.
const TIMESTAMP_LEN: usize = 12;

/// Catalog entry for one snapshot file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotDescriptor {
    pub filename: String,
    pub path: PathBuf,
    pub display_name: String,
    /// `YYYYMMDDHHMM` from the filename, empty when the filename does not
    /// carry a timestamp of that width.
    pub timestamp: String,
}

/// Read-only view over the directory snapshots are stored in.
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(config: &Config) -> Self {
        SnapshotStore {
            data_dir: config.data_dir.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// All snapshots of `account`, most recent first.
    pub fn find_snapshots(&self, account: &str) -> Vec<SnapshotDescriptor> {
        find_snapshots(account, &self.data_dir)
    }

    /// The two most recent snapshots of `account` as `(older, newer)`.
    pub fn latest_pair(&self, account: &str) -> Option<(SnapshotDescriptor, SnapshotDescriptor)> {
        let mut snapshots = self.find_snapshots(account).into_iter();
        let newer = snapshots.next()?;
        let older = snapshots.next()?;
        Some((older, newer))
    }
}

/// Find every snapshot of `account_name` in `directory`, most recent first.
///
/// Ordering compares the embedded timestamps as strings, which matches
/// chronological order only while every timestamp is the same fixed width.
/// Files without a parseable timestamp are listed after all dated ones.
///
/// Never fails: a directory that cannot be read is logged and treated as
/// empty.
pub fn find_snapshots(account_name: &str, directory: &Path) -> Vec<SnapshotDescriptor> {
    let account_name = account_name.trim();
    if account_name.is_empty() {
        return Vec::new();
    }

    let prefix = format!("{account_name}_data_");

    let entries = match WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(entries) => entries,
        Err(e) => {
            error!(
                account = account_name,
                directory = %directory.display(),
                "failed to search for snapshots: {e}"
            );
            return Vec::new();
        }
    };

    let mut snapshots: Vec<SnapshotDescriptor> = entries
        .into_iter()
        // links are not followed, so a symlinked snapshot reports the link type
        .filter(|entry| !entry.file_type().is_dir())
        .filter_map(|entry| {
            let filename = entry.file_name().to_str()?.to_string();
            describe(&prefix, filename, entry.into_path())
        })
        .collect();

    snapshots.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    debug!(account = account_name, count = snapshots.len(), "snapshot catalog built");
    snapshots
}

/// Build a descriptor if `filename` is a snapshot under `prefix`.
fn describe(prefix: &str, filename: String, path: PathBuf) -> Option<SnapshotDescriptor> {
    let remainder = filename.strip_prefix(prefix)?.strip_suffix(".json")?;

    let (timestamp, display_name) = match format_timestamp(remainder) {
        Some(label) => (remainder.to_string(), format!("{label} - {filename}")),
        None => (String::new(), filename.clone()),
    };

    Some(SnapshotDescriptor {
        filename,
        path,
        display_name,
        timestamp,
    })
}

/// Render `YYYYMMDDHHMM` as `DD/MM/YYYY HH:MM`.
///
/// Only the width is checked; the characters are taken positionally.
fn format_timestamp(raw: &str) -> Option<String> {
    // byte offset of every char boundary, including the end of the string
    let bounds: Vec<usize> = raw
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(raw.len()))
        .collect();
    if bounds.len() != TIMESTAMP_LEN + 1 {
        return None;
    }

    let part = |range: std::ops::Range<usize>| &raw[bounds[range.start]..bounds[range.end]];
    Some(format!(
        "{}/{}/{} {}:{}",
        part(6..8),
        part(4..6),
        part(0..4),
        part(8..10),
        part(10..12)
    ))
}
