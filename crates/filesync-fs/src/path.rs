//! Validated relative paths for manifest entries.
//!
//! Every path exchanged between the two sides of a sync is relative to
//! a sync root and uses forward slashes. [`RelativePath`] enforces that
//! shape on construction so later code can join paths under a root
//! without re-checking for traversal components.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A relative, forward-slash path with no traversal components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl RelativePath {
    /// Validate and normalize a path-like input.
    ///
    /// Backslashes are normalized to forward slashes. Absolute paths,
    /// drive prefixes and `.`/`..`/empty components are rejected.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let normalized = path.as_ref().replace('\\', "/");

        if normalized.is_empty() || normalized.starts_with('/') {
            return Err(Error::InvalidRelativePath { path: normalized });
        }

        for component in normalized.split('/') {
            if component.is_empty()
                || component == "."
                || component == ".."
                || component.contains(':')
            {
                return Err(Error::InvalidRelativePath { path: normalized });
            }
        }

        Ok(Self { inner: normalized })
    }

    /// Get the normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the final path component.
    pub fn file_name(&self) -> &str {
        self.inner.rsplit('/').next().unwrap_or(&self.inner)
    }

    /// Join this path under `root`, component by component, yielding a
    /// platform-native path for I/O.
    pub fn join_under(&self, root: &Path) -> PathBuf {
        let mut joined = root.to_path_buf();
        for component in self.inner.split('/') {
            joined.push(component);
        }
        joined
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}
