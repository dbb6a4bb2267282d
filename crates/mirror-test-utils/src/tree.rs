//! [`TestTrees`] builder for mirror test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

use crate::snapshot::TreeSnapshot;

/// A temporary directory holding `source/` and `replica/` side by side.
///
/// `source/` is created up front; `replica/` is only created when something
/// is written into it, so tests can cover a missing replica root.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::TestTrees;
///
/// let trees = TestTrees::new();
/// trees.source_file("a.txt", "hi");
/// trees.replica_file("old.txt", "stale");
/// trees.assert_mirrored();
/// ```
pub struct TestTrees {
    temp_dir: TempDir,
}

impl Default for TestTrees {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTrees {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        Self { temp_dir }
    }

    /// The temporary directory containing both trees.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn replica(&self) -> PathBuf {
        self.root().join("replica")
    }

    /// Write a source file, creating parents.
    pub fn source_file(&self, relative: &str, content: &str) -> PathBuf {
        write(&self.source().join(relative), content)
    }

    /// Write a replica file, creating parents.
    pub fn replica_file(&self, relative: &str, content: &str) -> PathBuf {
        write(&self.replica().join(relative), content)
    }

    pub fn source_dir(&self, relative: &str) -> PathBuf {
        mkdir(&self.source().join(relative))
    }

    /// Set the modification time of a file or directory to whole seconds.
    pub fn set_mtime(path: &Path, unix_secs: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
    }

    /// Create a symlink at `link` (relative to the source root) pointing at
    /// `target`.
    #[cfg(unix)]
    pub fn source_symlink(&self, relative: &str, target: &Path) -> PathBuf {
        let link = self.source().join(relative);
        std::os::unix::fs::symlink(target, &link).unwrap();
        link
    }

    /// Read a replica file as a string.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_replica(&self, relative: &str) -> String {
        let path = self.replica().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read replica file: {}", path.display()))
    }

    pub fn source_snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(&self.source())
    }

    pub fn replica_snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(&self.replica())
    }

    /// Assert the replica holds exactly the source's files and directories
    /// (links excluded), with equal content and mtime seconds.
    ///
    /// # Panics
    /// Panics with both snapshots if they differ.
    pub fn assert_mirrored(&self) {
        let source = self.source_snapshot().without_links();
        let replica = self.replica_snapshot();
        assert_eq!(
            source, replica,
            "Replica does not mirror source.\nSource: {source:#?}\nReplica: {replica:#?}"
        );
    }
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

fn mkdir(path: &Path) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    path.to_path_buf()
}
