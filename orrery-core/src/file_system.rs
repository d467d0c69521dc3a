//! Filesystem state probes and permission-tolerant removal.
//!
//! Existence is the only state these probes look at: nothing here reads file
//! contents or compares timestamps.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Checks if a directory exists at `path`.
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Checks if a file exists in the base directory.
pub fn has_file(base_dir: &Path, file_name: &str) -> bool {
    base_dir.join(file_name).is_file()
}

/// Path with the same parent and base name as `path` but the given extension.
pub fn sibling_with_extension(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension)
}

/// Whether `path` ends in `extension` (ASCII case-insensitive, no leading dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn subdirectories_sorted(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Regular files directly inside `dir` carrying `extension`, sorted by name.
pub fn files_with_extension_sorted(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Recursively delete `path`, repairing read-only permissions on the way.
///
/// A permission-denied failure on any entry grants the owner write access to
/// that entry and to its parent directory, then retries that deletion once.
/// Every other error, including a second permission failure, is returned
/// unchanged.
pub fn remove_path_protected(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        for entry in fs::read_dir(path)? {
            remove_path_protected(&entry?.path())?;
        }
        retry_with_write_access(path, |p| fs::remove_dir(p))
    } else {
        retry_with_write_access(path, |p| fs::remove_file(p))
    }
}

fn retry_with_write_access<F>(path: &Path, remove: F) -> io::Result<()>
where
    F: Fn(&Path) -> io::Result<()>,
{
    match remove(path) {
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            debug!(path = %path.display(), "permission denied, granting owner write and retrying");
            grant_owner_write(path)?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                grant_owner_write(parent)?;
            }
            remove(path)
        }
        other => other,
    }
}

#[cfg(unix)]
fn grant_owner_write(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }
    let mut permissions = metadata.permissions();
    permissions.set_mode(permissions.mode() | 0o200);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn grant_owner_write(path: &Path) -> io::Result<()> {
    let mut permissions = fs::symlink_metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
