//! Manifest construction by directory walk.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use filesync_proto::{FileEntry, Manifest};
use walkdir::WalkDir;

use crate::checksum::compute_file_checksum;
use crate::ignore::IgnoreRuleSet;
use crate::{Error, Result};

/// Build a manifest of every regular file under `root`.
///
/// The ignore-file is loaded from `root` before walking, so its own
/// exclusion and any rules it defines apply to the whole scan. Paths
/// in the result are relative to `root` with forward slashes.
/// Enumeration order is deterministic per run; callers may rely on set
/// membership only.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `root` does not resolve to
/// an existing directory. Files that become unreadable mid-walk are
/// logged and skipped rather than failing the scan.
pub fn scan(root: &Path) -> Result<Manifest> {
    let root = dunce::canonicalize(root).map_err(|_| Error::DirectoryNotFound {
        path: root.to_path_buf(),
    })?;
    if !root.is_dir() {
        return Err(Error::DirectoryNotFound { path: root });
    }

    let rules = IgnoreRuleSet::load(&root);
    let mut manifest = Manifest::new();

    for entry in WalkDir::new(&root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(&root) {
            Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
            Err(_) => continue,
        };
        if rules.matches(&relative) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(error) => {
                tracing::warn!(path = %relative, %error, "skipping file without metadata");
                continue;
            }
        };
        let checksum = match compute_file_checksum(entry.path()) {
            Ok(checksum) => checksum,
            Err(error) => {
                tracing::warn!(path = %relative, %error, "skipping unreadable file");
                continue;
            }
        };

        manifest.insert(FileEntry {
            path: relative,
            size: metadata.len(),
            modified: metadata
                .modified()
                .map(unix_timestamp)
                .unwrap_or_default(),
            permissions: permission_string(&metadata),
            checksum,
        });
    }

    tracing::debug!(root = %root.display(), files = manifest.len(), "scanned directory");
    Ok(manifest)
}

fn unix_timestamp(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_secs() as i64,
        Err(error) => -(error.duration().as_secs() as i64),
    }
}

#[cfg(unix)]
fn permission_string(metadata: &std::fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:04o}", metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn permission_string(_metadata: &std::fs::Metadata) -> String {
    "0644".to_string()
}
