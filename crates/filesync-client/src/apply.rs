//! Applying diff results to the local tree.
//!
//! Server-supplied paths are revalidated here before any write or
//! delete; a compromised server must not be able to steer the client
//! outside its own destination directory.

use std::fs;
use std::io;
use std::path::Path;

use filesync_fs::RelativePath;
use filesync_fs::io::write_atomic;
use filesync_proto::FileEntry;
use filetime::FileTime;

use crate::{Error, Result};

/// Write one downloaded file under `directory`, then carry over its
/// permissions and modified time.
///
/// The timestamp is applied after the permissions: a mode change can
/// disturb mtime on some filesystems.
pub fn apply_entry(directory: &Path, entry: &FileEntry, bytes: &[u8]) -> Result<()> {
    let relative = RelativePath::new(&entry.path)?;
    let target = relative.join_under(directory);

    write_atomic(&target, bytes)?;
    apply_permissions(&target, &entry.permissions);
    filetime::set_file_mtime(&target, FileTime::from_unix_time(entry.modified, 0))
        .map_err(|e| Error::io(&target, e))?;

    Ok(())
}

/// Remove one local file named in a delete set. A path that is
/// already gone counts as removed.
pub fn remove_entry(directory: &Path, path: &str) -> Result<()> {
    let relative = RelativePath::new(path)?;
    let target = relative.join_under(directory);

    match fs::remove_file(&target) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(Error::io(&target, error)),
    }
}

#[cfg(unix)]
fn apply_permissions(path: &Path, permissions: &str) {
    use std::os::unix::fs::PermissionsExt;

    match u32::from_str_radix(permissions, 8) {
        Ok(mode) => {
            if let Err(error) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
                tracing::warn!(path = %path.display(), %error, "could not apply permissions");
            }
        }
        Err(_) => {
            tracing::warn!(permissions, "ignoring unparseable permission string");
        }
    }
}

#[cfg(not(unix))]
fn apply_permissions(_path: &Path, _permissions: &str) {}
