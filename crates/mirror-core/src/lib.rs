//! Synchronization engine for Folder Mirror
//!
//! This crate mirrors a source directory tree onto a replica tree, one way,
//! on a fixed schedule:
//!
//! - **Change detection**: size + whole-second mtime comparison, no hashing
//! - **Tree copier**: creates and updates replica entries from the source
//! - **Tree pruner**: removes replica entries that are orphaned or mismatched
//! - **Scheduler**: runs N copy-then-prune passes with a sleep in between
//! - **Reporter**: explicit sink for every mutating action and error
//!
//! # Architecture
//!
//! ```text
//!              CLI
//!               |
//!          mirror-core
//!               |
//!           mirror-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mirror_core::{Scheduler, SyncConfig, ThreadSleeper, TracingReporter};
//!
//! fn example() -> mirror_core::Result<()> {
//!     let config = SyncConfig::new("data", "backup", 30, 10, "mirror.log")?;
//!     let report = Scheduler::new(config.paths, config.schedule, &TracingReporter, &ThreadSleeper).run();
//!     println!("{} of {} passes clean", report.clean_passes(), report.passes.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod reporter;
pub mod sync;

pub use config::{Schedule, SyncConfig};
pub use error::{Error, Phase, Result};
pub use reporter::{MemoryReporter, RemovalCause, Reporter, SkipReason, SyncEvent, TracingReporter};
pub use sync::{
    CopyStats, PassReport, PruneStats, ScheduleReport, Scheduler, SchedulerState, Sleeper,
    ThreadSleeper, TreeCopier, TreePruner, needs_copy, run_pass,
};
