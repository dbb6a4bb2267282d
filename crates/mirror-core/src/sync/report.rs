//! Per-pass and per-schedule summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the copier did during one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyStats {
    /// Files created or updated in the replica
    pub files_copied: usize,
    /// Directories created in the replica
    pub dirs_created: usize,
    /// Source links and special files ignored
    pub skipped: usize,
    /// Entries left for the pruner because their kinds differ
    pub deferred: usize,
}

/// What the pruner did during one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneStats {
    pub files_removed: usize,
    pub dirs_removed: usize,
    /// Top-level entries removed because their kind differed from the source
    pub type_mismatches: usize,
}

/// Outcome of one copy-then-prune pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub copy: CopyStats,
    pub prune: PruneStats,
    /// One line per failed item, prefixed with its phase
    pub errors: Vec<String>,
}

impl PassReport {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total copies and removals performed.
    pub fn mutations(&self) -> usize {
        self.copy.files_copied + self.prune.files_removed + self.prune.dirs_removed
    }
}

/// Outcome of a whole schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub passes: Vec<PassReport>,
    /// Sleeps between passes that returned an error
    pub sleep_failures: u32,
}

impl ScheduleReport {
    /// Number of passes that finished without any failed item.
    pub fn clean_passes(&self) -> usize {
        self.passes.iter().filter(|pass| pass.succeeded()).count()
    }
}
