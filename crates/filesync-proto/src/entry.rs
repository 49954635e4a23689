//! Manifest records describing a directory tree's state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One file in a manifest.
///
/// `path` is relative to the manifest root, forward-slash separated, and
/// unique within a manifest. `permissions` is a 4-digit zero-padded octal
/// string (e.g. `"0644"`); `checksum` is an 8-hex-digit crc32 of the file
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
    pub modified: i64,
    pub permissions: String,
    pub checksum: String,
}

/// A set of [`FileEntry`] records keyed by path.
///
/// Paths are unique by construction; inserting an entry for an existing
/// path replaces it. Iteration follows lexical path order, which keeps
/// diff output deterministic within a run. Callers may rely on set
/// membership only, never on cross-run ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, FileEntry>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry for the same path.
    pub fn insert(&mut self, entry: FileEntry) {
        self.entries.insert(entry.path.clone(), entry);
    }

    /// Look up an entry by its relative path.
    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.get(path)
    }

    /// Whether an entry exists for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in lexical path order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    /// Iterate paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consume the manifest into its wire representation: a plain list of
    /// entries.
    pub fn into_entries(self) -> Vec<FileEntry> {
        self.entries.into_values().collect()
    }
}

impl From<Vec<FileEntry>> for Manifest {
    fn from(entries: Vec<FileEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl FromIterator<FileEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for entry in iter {
            manifest.insert(entry);
        }
        manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> FileEntry {
        FileEntry {
            path: path.to_string(),
            size: 1,
            modified: 1_600_000_000,
            permissions: "0644".to_string(),
            checksum: "00000000".to_string(),
        }
    }

    #[test]
    fn insert_replaces_duplicate_path() {
        let mut manifest = Manifest::new();
        manifest.insert(entry("a.txt"));
        manifest.insert(FileEntry {
            size: 99,
            ..entry("a.txt")
        });

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("a.txt").map(|e| e.size), Some(99));
    }

    #[test]
    fn iteration_is_lexical() {
        let manifest: Manifest = vec![entry("b"), entry("a"), entry("a/c")].into();
        let paths: Vec<&str> = manifest.paths().collect();
        assert_eq!(paths, vec!["a", "a/c", "b"]);
    }

    #[test]
    fn wire_shape_field_names() {
        let json = serde_json::to_value(entry("docs/readme.md")).unwrap();
        assert_eq!(json["path"], "docs/readme.md");
        assert_eq!(json["size"], 1);
        assert_eq!(json["modified"], 1_600_000_000);
        assert_eq!(json["permissions"], "0644");
        assert_eq!(json["checksum"], "00000000");
    }

    #[test]
    fn entry_round_trips_through_json() {
        let original = entry("folder/.gitignore");
        let json = serde_json::to_string(&original).unwrap();
        let back: FileEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
