//! One-way tree synchronization
//!
//! This module provides:
//! - **detector**: decide from metadata whether a replica file is stale
//! - **copier**: bring the replica up to date with every source file and directory
//! - **pruner**: remove replica entries the source no longer has
//! - **scheduler**: run copy-then-prune passes on a fixed interval

mod copier;
mod detector;
mod pruner;
mod report;
mod scheduler;

pub use copier::TreeCopier;
pub use detector::needs_copy;
pub use pruner::TreePruner;
pub use report::{CopyStats, PassReport, PruneStats, ScheduleReport};
pub use scheduler::{Scheduler, SchedulerState, Sleeper, ThreadSleeper, run_pass};
