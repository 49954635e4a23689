//! Pure manifest comparison.
//!
//! `diff` is a pure function of two manifests and a comparison mode; it
//! performs no I/O and has no ordering guarantee beyond the manifests'
//! own deterministic path order.

use serde::{Deserialize, Serialize};

use crate::entry::{FileEntry, Manifest};

/// How two entries for the same path are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// Compare size, modified time and permissions. The cheap default.
    Metadata,
    /// Compare content checksums only. Useful right after a fresh
    /// download, when destination timestamps are not yet trustworthy.
    Checksum,
}

impl CompareMode {
    /// Map the wire-level `checksum` flag to a mode.
    pub fn from_checksum_flag(checksum: bool) -> Self {
        if checksum { Self::Checksum } else { Self::Metadata }
    }
}

/// Output of [`diff`]: what a destination must do to match a source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Entries present in the source but absent from, or differing in,
    /// the destination.
    pub update: Vec<FileEntry>,
    /// Paths present in the destination but absent from the source.
    pub delete: Vec<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.update.is_empty() && self.delete.is_empty()
    }
}

/// Compare `source` against `destination` under `mode`.
pub fn diff(source: &Manifest, destination: &Manifest, mode: CompareMode) -> DiffResult {
    let mut result = DiffResult::default();

    for entry in source.entries() {
        match destination.get(&entry.path) {
            Some(existing) if entries_match(entry, existing, mode) => {}
            _ => result.update.push(entry.clone()),
        }
    }

    for path in destination.paths() {
        if !source.contains(path) {
            result.delete.push(path.to_string());
        }
    }

    result
}

fn entries_match(source: &FileEntry, destination: &FileEntry, mode: CompareMode) -> bool {
    match mode {
        CompareMode::Checksum => source.checksum == destination.checksum,
        CompareMode::Metadata => {
            source.size == destination.size
                && source.modified == destination.modified
                && source.permissions == destination.permissions
        }
    }
}
