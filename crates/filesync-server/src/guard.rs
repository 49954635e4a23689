//! Secure download guard.
//!
//! Every rejection is the same uniform NotFound, whatever the cause,
//! so probing requests cannot distinguish "exists but refused" from
//! "does not exist". Ignore rules are re-loaded on every request
//! because a download can arrive without a preceding difference call.

use std::path::PathBuf;

use filesync_fs::{IGNORE_FILE_NAME, IgnoreRuleSet, RelativePath};

use crate::{Error, Result};

/// Validates client-supplied paths against a serving root.
#[derive(Debug, Clone)]
pub struct DownloadGuard {
    root: PathBuf,
}

impl DownloadGuard {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a client-supplied relative path to a canonical file
    /// path under the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the path is malformed, escapes
    /// the root via traversal or symlink, names the ignore-file, is
    /// matched by the root's ignore rules, or is not a regular file.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf> {
        let relative = match RelativePath::new(requested) {
            Ok(relative) => relative,
            Err(_) => {
                tracing::warn!(requested, "download refused: malformed path");
                return Err(Error::NotFound);
            }
        };

        if relative.file_name() == IGNORE_FILE_NAME {
            tracing::warn!(requested, "download refused: reserved name");
            return Err(Error::NotFound);
        }

        let canonical_root = match dunce::canonicalize(&self.root) {
            Ok(root) => root,
            Err(error) => {
                tracing::warn!(%error, "download refused: serving root unavailable");
                return Err(Error::NotFound);
            }
        };

        if IgnoreRuleSet::load(&canonical_root).matches(relative.as_str()) {
            tracing::warn!(requested, "download refused: ignored path");
            return Err(Error::NotFound);
        }

        let full_path = relative.join_under(&canonical_root);
        let canonical = match dunce::canonicalize(&full_path) {
            Ok(canonical) => canonical,
            Err(_) => {
                tracing::warn!(requested, "download refused: unresolvable path");
                return Err(Error::NotFound);
            }
        };

        if !canonical.starts_with(&canonical_root) {
            tracing::warn!(requested, "download refused: escapes serving root");
            return Err(Error::NotFound);
        }

        // A symlink with an innocent name can still resolve onto the
        // ignore-file; check the resolved name as well.
        if canonical.file_name().is_some_and(|n| n == IGNORE_FILE_NAME) {
            tracing::warn!(requested, "download refused: resolves to reserved name");
            return Err(Error::NotFound);
        }

        if !canonical.is_file() {
            tracing::warn!(requested, "download refused: not a regular file");
            return Err(Error::NotFound);
        }

        Ok(canonical)
    }
}
