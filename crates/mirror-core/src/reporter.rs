//! Reporting sink for sync activity
//!
//! Every component receives a `&dyn Reporter` and emits a [`SyncEvent`]
//! after each action succeeds. [`TracingReporter`] turns events into
//! `tracing` records; [`MemoryReporter`] keeps them for inspection.

use std::cell::RefCell;
use std::path::PathBuf;

/// Why an entry was removed from the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    /// No counterpart exists in the source
    Orphaned,
    /// The source holds a directory where the replica does not, or vice versa
    TypeMismatch,
}

/// Why an entry was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Symbolic links are never followed or copied
    Symlink,
    /// FIFOs, sockets, device nodes
    Special,
    /// Kind differs from the source; the pruner removes it this pass
    TypeMismatch,
}

/// Something that happened during a schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    PassStarted { pass: u32, total: u32 },
    PassFinished { pass: u32, total: u32, failed: bool },
    FileCopied { path: PathBuf },
    DirectoryCreated { path: PathBuf },
    FileRemoved { path: PathBuf, cause: RemovalCause },
    DirectoryRemoved { path: PathBuf, cause: RemovalCause },
    Skipped { path: PathBuf, reason: SkipReason },
    SyncFailed { pass: u32, error: String },
    SleepFailed { error: String },
}

impl SyncEvent {
    /// Copies and removals: the events a no-op pass never emits.
    ///
    /// Directory creation is excluded; it is implied by the copies beneath it.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::FileCopied { .. } | Self::FileRemoved { .. } | Self::DirectoryRemoved { .. }
        )
    }
}

/// Sink for [`SyncEvent`]s.
pub trait Reporter {
    fn report(&self, event: SyncEvent);
}

/// Emits each event as a `tracing` record with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: SyncEvent) {
        match event {
            SyncEvent::PassStarted { pass, total } => {
                tracing::info!(pass, total, "sync started");
            }
            SyncEvent::PassFinished { pass, total, failed } => {
                tracing::info!(pass, total, failed, "sync done");
            }
            SyncEvent::FileCopied { path } => {
                tracing::info!(path = %path.display(), "file copied/updated");
            }
            SyncEvent::DirectoryCreated { path } => {
                tracing::debug!(path = %path.display(), "directory created");
            }
            SyncEvent::FileRemoved { path, cause: RemovalCause::Orphaned } => {
                tracing::info!(path = %path.display(), "file removed");
            }
            SyncEvent::FileRemoved { path, cause: RemovalCause::TypeMismatch } => {
                tracing::info!(path = %path.display(), "file removed, cause: type mismatch");
            }
            SyncEvent::DirectoryRemoved { path, cause: RemovalCause::Orphaned } => {
                tracing::info!(path = %path.display(), "directory removed");
            }
            SyncEvent::DirectoryRemoved { path, cause: RemovalCause::TypeMismatch } => {
                tracing::info!(path = %path.display(), "directory removed, cause: type mismatch");
            }
            SyncEvent::Skipped { path, reason } => {
                tracing::debug!(path = %path.display(), ?reason, "skipped");
            }
            SyncEvent::SyncFailed { pass, error } => {
                tracing::error!(pass, "sync error: {error}");
            }
            SyncEvent::SleepFailed { error } => {
                tracing::error!("sleep error: {error}");
            }
        }
    }
}

/// Records events in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<SyncEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.borrow().clone()
    }

    /// Recorded events for which [`SyncEvent::is_mutation`] holds.
    pub fn mutations(&self) -> Vec<SyncEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.is_mutation())
            .cloned()
            .collect()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<SyncEvent> {
        self.events.take()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: SyncEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reporter_keeps_order_and_filters_mutations() {
        let reporter = MemoryReporter::new();
        reporter.report(SyncEvent::PassStarted { pass: 1, total: 1 });
        reporter.report(SyncEvent::DirectoryCreated { path: "/r/sub".into() });
        reporter.report(SyncEvent::FileCopied { path: "/r/sub/a".into() });
        reporter.report(SyncEvent::PassFinished { pass: 1, total: 1, failed: false });

        assert_eq!(reporter.events().len(), 4);
        assert_eq!(
            reporter.mutations(),
            vec![SyncEvent::FileCopied { path: "/r/sub/a".into() }]
        );
        assert_eq!(reporter.take().len(), 4);
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn tracing_reporter_accepts_every_event() {
        let reporter = TracingReporter;
        for event in [
            SyncEvent::PassStarted { pass: 1, total: 2 },
            SyncEvent::FileRemoved { path: "/r/x".into(), cause: RemovalCause::TypeMismatch },
            SyncEvent::Skipped { path: "/s/link".into(), reason: SkipReason::Symlink },
            SyncEvent::SleepFailed { error: "interrupted".into() },
        ] {
            reporter.report(event);
        }
    }
}
