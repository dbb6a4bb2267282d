//! Paired source/replica paths and path resolution

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A source path and the replica path at the same relative position.
///
/// The only way to descend is [`PathPair::join`], which appends the same
/// name on both sides, so the two paths always share their relative suffix
/// under the roots the pair was created from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPair {
    source: PathBuf,
    replica: PathBuf,
}

impl PathPair {
    /// Create a pair from two tree roots.
    pub fn new(source: impl Into<PathBuf>, replica: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    /// Descend into the entry called `name` on both sides.
    pub fn join(&self, name: impl AsRef<OsStr>) -> Self {
        let name = name.as_ref();
        Self {
            source: self.source.join(name),
            replica: self.replica.join(name),
        }
    }

    /// Whether one tree contains the other (or they are the same tree).
    ///
    /// Compares the paths as given; resolve both with [`resolve`] first to
    /// see through `..` and links.
    pub fn is_nested(&self) -> bool {
        self.source.starts_with(&self.replica) || self.replica.starts_with(&self.source)
    }
}

impl std::fmt::Display for PathPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source.display(), self.replica.display())
    }
}

/// Resolve a path to an absolute canonical form, even if it does not exist.
///
/// The nearest existing ancestor is canonicalized and the missing tail is
/// appended verbatim.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(path, e))?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        match dunce::canonicalize(existing) {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Ok(resolved);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => return Err(Error::io(path, e)),
                }
            }
            Err(e) => return Err(Error::io(existing, e)),
        }
    }
}
