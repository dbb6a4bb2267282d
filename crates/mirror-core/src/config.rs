//! Validated run configuration
//!
//! [`SyncConfig::new`] is the single gate between raw user input and the
//! scheduler: nothing is synchronized until every check here has passed.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mirror_fs::PathPair;

use crate::{Error, Result};

/// How many passes to run and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub passes: NonZeroU32,
    pub interval: Duration,
}

impl Schedule {
    /// Validate a raw interval (seconds) and pass count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeInterval`] for an interval below zero and
    /// [`Error::InvalidPassCount`] for a pass count below one or above
    /// `u32::MAX`.
    pub fn new(interval_secs: i64, passes: i64) -> Result<Self> {
        let interval = u64::try_from(interval_secs)
            .map_err(|_| Error::NegativeInterval {
                value: interval_secs,
            })?;
        let passes = u32::try_from(passes)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(Error::InvalidPassCount { value: passes })?;

        Ok(Self {
            passes,
            interval: Duration::from_secs(interval),
        })
    }

    pub fn total(&self) -> u32 {
        self.passes.get()
    }
}

/// Everything a run needs, already validated.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Source and replica roots, as given by the user
    pub paths: PathPair,
    pub schedule: Schedule,
    /// Where log lines are appended
    pub log_file: PathBuf,
}

impl SyncConfig {
    /// Validate raw arguments into a configuration.
    ///
    /// Checks run in this order: the source is an existing directory, the
    /// interval is non-negative, the pass count is at least one, and the two
    /// trees do not contain each other.
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        interval_secs: i64,
        passes: i64,
        log_file: impl Into<PathBuf>,
    ) -> Result<Self> {
        let source = source.into();
        let replica = replica.into();

        if !source.is_dir() {
            return Err(Error::SourceNotDirectory { path: source });
        }
        let schedule = Schedule::new(interval_secs, passes)?;
        ensure_disjoint(&source, &replica)?;

        Ok(Self {
            paths: PathPair::new(source, replica),
            schedule,
            log_file: log_file.into(),
        })
    }
}

fn ensure_disjoint(source: &Path, replica: &Path) -> Result<()> {
    let resolved = PathPair::new(mirror_fs::resolve(source)?, mirror_fs::resolve(replica)?);
    if resolved.is_nested() {
        return Err(Error::OverlappingTrees {
            source_dir: resolved.source().to_path_buf(),
            replica_dir: resolved.replica().to_path_buf(),
        });
    }
    Ok(())
}
