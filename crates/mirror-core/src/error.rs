//! Error types for mirror-core

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// The half of a sync pass an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Copy,
    Prune,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Prune => f.write_str("prune"),
        }
    }
}

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source path is missing or not a directory
    #[error("Source must be an existing directory: {path}")]
    SourceNotDirectory { path: PathBuf },

    /// Interval between passes is negative
    #[error("Interval between synchronizations must be >= 0, got {value}")]
    NegativeInterval { value: i64 },

    /// Pass count is zero, negative, or too large
    #[error("Number of synchronizations must be between 1 and {max}, got {value}", max = u32::MAX)]
    InvalidPassCount { value: i64 },

    /// Source and replica are the same tree or one contains the other
    #[error("Source {source_dir} and replica {replica_dir} must not contain each other")]
    OverlappingTrees {
        source_dir: PathBuf,
        replica_dir: PathBuf,
    },

    /// A copy or prune walk finished but some entries failed
    #[error("{phase} finished with {} failed item(s)", .failures.len())]
    Incomplete {
        phase: Phase,
        failures: Vec<mirror_fs::Error>,
    },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}

impl Error {
    /// Collect per-item failures of a walk into a result.
    pub fn check(phase: Phase, failures: Vec<mirror_fs::Error>) -> Result<()> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Self::Incomplete { phase, failures })
        }
    }

    /// One human-readable line per underlying cause.
    pub fn causes(&self) -> Vec<String> {
        match self {
            Self::Incomplete { phase, failures } => failures
                .iter()
                .map(|failure| format!("{phase}: {failure}"))
                .collect(),
            other => vec![other.to_string()],
        }
    }
}
