//! Whole-tree snapshots keyed by relative path.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;

/// One node of a captured tree. Links are recorded, never followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Dir,
    File { content: Vec<u8>, mtime_secs: i64 },
    Symlink,
}

/// Every node under a root, keyed by path relative to that root.
///
/// A missing root captures as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub entries: BTreeMap<PathBuf, Entry>,
}

impl TreeSnapshot {
    pub fn capture(root: &Path) -> Self {
        let mut entries = BTreeMap::new();
        if root.is_dir() {
            walk(root, Path::new(""), &mut entries);
        }
        Self { entries }
    }

    /// Drop symlinks, which the mirror never reproduces.
    pub fn without_links(mut self) -> Self {
        self.entries.retain(|_, entry| *entry != Entry::Symlink);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn walk(dir: &Path, relative: &Path, entries: &mut BTreeMap<PathBuf, Entry>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        let rel = relative.join(entry.file_name());
        let metadata = fs::symlink_metadata(&path).unwrap();
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            entries.insert(rel, Entry::Symlink);
        } else if file_type.is_dir() {
            entries.insert(rel.clone(), Entry::Dir);
            walk(&path, &rel, entries);
        } else {
            entries.insert(
                rel,
                Entry::File {
                    content: fs::read(&path).unwrap(),
                    mtime_secs: FileTime::from_last_modification_time(&metadata).unix_seconds(),
                },
            );
        }
    }
}
