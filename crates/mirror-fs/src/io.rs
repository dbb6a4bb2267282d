//! Atomic copies and idempotent removal

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::{Error, Result};

/// List the entry names of a directory in byte order.
pub fn read_dir_sorted(dir: &Path) -> Result<Vec<OsString>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut names = entries
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    names.sort_unstable();
    Ok(names)
}

/// Like [`read_dir_sorted`], but a directory that has vanished lists as empty.
pub fn read_dir_sorted_or_empty(dir: &Path) -> Result<Vec<OsString>> {
    match read_dir_sorted(dir) {
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// Create a directory and any missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// The temporary path a copy to `dest` is staged at before the rename.
///
/// Lives in the destination directory so the rename never crosses
/// filesystems.
pub fn staging_path(dest: &Path) -> PathBuf {
    let staging_name = format!(
        ".{}.{}.tmp",
        dest.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    dest.with_file_name(staging_name)
}

/// Copy a regular file so that `dest` ends up with the same content, size,
/// and access/modification times as `source`.
///
/// The copy is staged next to `dest`, flushed to disk, and renamed over it.
/// A symlink at `dest` is replaced, never written through. Missing parent
/// directories are created. Returns the number of bytes copied.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    let metadata = fs::symlink_metadata(source).map_err(|e| Error::io(source, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile {
            path: source.to_path_buf(),
        });
    }

    if let Some(parent) = dest.parent() {
        create_dir_all(parent)?;
    }

    let staging = staging_path(dest);
    let result = stage(source, &staging, &metadata).and_then(|bytes| {
        fs::rename(&staging, dest).map_err(|e| Error::io(dest, e))?;
        Ok(bytes)
    });

    if result.is_err() {
        // Leftovers are pruned on the next pass anyway
        let _ = fs::remove_file(&staging);
    }
    result
}

fn stage(source: &Path, staging: &Path, metadata: &fs::Metadata) -> Result<u64> {
    let bytes = fs::copy(source, staging).map_err(|e| Error::Copy {
        from: source.to_path_buf(),
        to: staging.to_path_buf(),
        source: e,
    })?;

    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);
    filetime::set_file_times(staging, atime, mtime).map_err(|e| Error::io(staging, e))?;

    OpenOptions::new()
        .write(true)
        .open(staging)
        .and_then(|file| file.sync_all())
        .map_err(|e| Error::io(staging, e))?;

    tracing::trace!(source = %source.display(), staging = %staging.display(), bytes, "staged copy");
    Ok(bytes)
}

/// Remove a file or symlink.
///
/// Returns `Ok(false)` if nothing was there to remove.
pub fn remove_file(path: &Path) -> Result<bool> {
    absorb_not_found(path, fs::remove_file(path))
}

/// Remove an empty directory.
///
/// Returns `Ok(false)` if nothing was there to remove.
pub fn remove_dir(path: &Path) -> Result<bool> {
    absorb_not_found(path, fs::remove_dir(path))
}

fn absorb_not_found(path: &Path, result: std::io::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}
