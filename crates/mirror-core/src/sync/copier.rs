//! Source-driven walk that creates and updates replica entries

use std::ffi::OsString;

use mirror_fs::{NodeKind, PathPair, io};

use super::detector::needs_copy;
use super::report::CopyStats;
use crate::reporter::{Reporter, SkipReason, SyncEvent};
use crate::{Error, Phase, Result};

/// Walks the source tree and makes the replica hold every source directory
/// and an up-to-date copy of every source file.
///
/// Entries are visited depth-first in byte order of their names. A failure
/// on one entry is recorded and the walk moves on; an unreadable directory
/// skips only its own subtree.
pub struct TreeCopier<'a> {
    reporter: &'a dyn Reporter,
    stats: CopyStats,
}

impl<'a> TreeCopier<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self {
            reporter,
            stats: CopyStats::default(),
        }
    }

    /// Counters accumulated across all walks made by this copier.
    pub fn stats(&self) -> CopyStats {
        self.stats
    }

    /// Copy everything under `root.source()` into `root.replica()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] carrying every per-entry failure once
    /// the walk has finished.
    pub fn copy_folder(&mut self, root: &PathPair) -> Result<()> {
        let mut failures = Vec::new();
        let mut pending = Vec::new();

        match io::read_dir_sorted(root.source()) {
            Ok(names) => push_children(&mut pending, root, names),
            Err(e) => failures.push(e),
        }

        while let Some(pair) = pending.pop() {
            if let Err(e) = self.visit(&pair, &mut pending) {
                failures.push(e);
            }
        }

        Error::check(Phase::Copy, failures)
    }

    fn visit(&mut self, pair: &PathPair, pending: &mut Vec<PathPair>) -> mirror_fs::Result<()> {
        match NodeKind::probe(pair.source())? {
            NodeKind::Directory => self.visit_directory(pair, pending),
            NodeKind::File(stamp) => {
                let replica = NodeKind::probe(pair.replica())?;
                if replica.is_dir() {
                    self.defer(pair);
                } else if needs_copy(&stamp, &replica) {
                    io::copy_file(pair.source(), pair.replica())?;
                    self.stats.files_copied += 1;
                    self.reporter.report(SyncEvent::FileCopied {
                        path: pair.replica().to_path_buf(),
                    });
                }
                Ok(())
            }
            NodeKind::Symlink => {
                self.skip(pair, SkipReason::Symlink);
                Ok(())
            }
            NodeKind::Special => {
                self.skip(pair, SkipReason::Special);
                Ok(())
            }
            // Vanished since its parent was listed
            NodeKind::Missing => Ok(()),
        }
    }

    fn visit_directory(
        &mut self,
        pair: &PathPair,
        pending: &mut Vec<PathPair>,
    ) -> mirror_fs::Result<()> {
        match NodeKind::probe(pair.replica())? {
            NodeKind::Directory => {}
            NodeKind::Missing => {
                io::create_dir_all(pair.replica())?;
                self.stats.dirs_created += 1;
                self.reporter.report(SyncEvent::DirectoryCreated {
                    path: pair.replica().to_path_buf(),
                });
            }
            _ => {
                self.defer(pair);
                return Ok(());
            }
        }

        let names = io::read_dir_sorted(pair.source())?;
        push_children(pending, pair, names);
        Ok(())
    }

    fn defer(&mut self, pair: &PathPair) {
        self.stats.deferred += 1;
        self.reporter.report(SyncEvent::Skipped {
            path: pair.replica().to_path_buf(),
            reason: SkipReason::TypeMismatch,
        });
    }

    fn skip(&mut self, pair: &PathPair, reason: SkipReason) {
        self.stats.skipped += 1;
        self.reporter.report(SyncEvent::Skipped {
            path: pair.source().to_path_buf(),
            reason,
        });
    }
}

/// Push children in reverse so the stack pops them in byte order.
pub(super) fn push_children(pending: &mut Vec<PathPair>, parent: &PathPair, names: Vec<OsString>) {
    pending.extend(names.iter().rev().map(|name| parent.join(name)));
}
