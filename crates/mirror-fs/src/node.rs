//! Link-aware classification of filesystem nodes

use std::fs::Metadata;
use std::path::Path;

use filetime::FileTime;

use crate::{Error, Result};

/// The metadata a file is compared on: size and modification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: FileTime,
}

impl FileStamp {
    pub fn new(len: u64, modified: FileTime) -> Self {
        Self { len, modified }
    }

    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            len: metadata.len(),
            modified: FileTime::from_last_modification_time(metadata),
        }
    }

    /// Modification time truncated to whole seconds since the Unix epoch.
    pub fn modified_secs(&self) -> i64 {
        self.modified.unix_seconds()
    }
}

/// What sits at a path, without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Nothing exists at the path
    Missing,
    /// A regular file
    File(FileStamp),
    /// A real directory (not a link to one)
    Directory,
    /// A symbolic link, whatever it points at
    Symlink,
    /// FIFOs, sockets, device nodes
    Special,
}

impl NodeKind {
    /// Classify the node at `path` using `symlink_metadata`.
    ///
    /// A missing path is `Missing`, not an error.
    pub fn probe(path: &Path) -> Result<Self> {
        match std::fs::symlink_metadata(path) {
            Ok(metadata) => Ok(Self::from_metadata(&metadata)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::Missing),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Classify already-fetched (non-following) metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File(FileStamp::from_metadata(metadata))
        } else {
            Self::Special
        }
    }

    pub fn exists(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Whether the node can be mirrored (regular files and directories).
    ///
    /// Links and special files are invisible on the source side.
    pub fn is_mirrorable(&self) -> bool {
        matches!(self, Self::File(_) | Self::Directory)
    }

    pub fn stamp(&self) -> Option<&FileStamp> {
        match self {
            Self::File(stamp) => Some(stamp),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Missing => "missing",
            Self::File(_) => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Special => "special file",
        };
        f.write_str(name)
    }
}
