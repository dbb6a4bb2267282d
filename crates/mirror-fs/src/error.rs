//! Error types for mirror-fs

use std::path::{Path, PathBuf};

/// Result type for mirror-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {path}")]
    NotAFile { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the failed operation was acting on.
    ///
    /// For copies this is the destination.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::NotAFile { path } => path,
            Self::Copy { to, .. } => to,
        }
    }

    /// Whether the underlying OS error was "not found".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } | Self::Copy { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            Self::NotAFile { .. } => false,
        }
    }
}
