//! Replica-driven walk that removes what the source no longer has

use std::path::{Path, PathBuf};

use mirror_fs::{NodeKind, PathPair, io};

use super::copier::push_children;
use super::report::PruneStats;
use crate::reporter::{RemovalCause, Reporter, SyncEvent};
use crate::{Error, Phase, Result};

/// Walks the replica tree and removes every entry that has no mirrorable
/// counterpart in the source, or whose directory-ness differs from it.
///
/// The pruner never creates anything; a removed mismatch is recreated by the
/// next copy walk. Entries already gone when removal is attempted count as
/// removed silently.
pub struct TreePruner<'a> {
    reporter: &'a dyn Reporter,
    stats: PruneStats,
}

/// One step of a depth-first tree removal.
enum Removal {
    Enter(PathBuf),
    Leave(PathBuf),
}

impl<'a> TreePruner<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self {
            reporter,
            stats: PruneStats::default(),
        }
    }

    pub fn stats(&self) -> PruneStats {
        self.stats
    }

    /// Prune `root.replica()` against `root.source()`.
    ///
    /// A missing replica root is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] carrying every per-entry failure once
    /// the walk has finished. When the source root cannot be listed nothing
    /// is removed and the listing failure is returned.
    pub fn delete(&mut self, root: &PathPair) -> Result<()> {
        // Every replica entry would look orphaned against an unreadable source
        if let Err(e) = io::read_dir_sorted(root.source()) {
            return Error::check(Phase::Prune, vec![e]);
        }

        let mut failures = Vec::new();
        let mut pending = Vec::new();

        match io::read_dir_sorted_or_empty(root.replica()) {
            Ok(names) => push_children(&mut pending, root, names),
            Err(e) => failures.push(e),
        }

        while let Some(pair) = pending.pop() {
            if let Err(e) = self.visit(&pair, &mut pending, &mut failures) {
                failures.push(e);
            }
        }

        Error::check(Phase::Prune, failures)
    }

    fn visit(
        &mut self,
        pair: &PathPair,
        pending: &mut Vec<PathPair>,
        failures: &mut Vec<mirror_fs::Error>,
    ) -> mirror_fs::Result<()> {
        let replica = NodeKind::probe(pair.replica())?;
        if !replica.exists() {
            return Ok(());
        }

        // Links and special files are never mirrored, so a source holding
        // one counts as holding nothing.
        let source = NodeKind::probe(pair.source())?;
        if !source.is_mirrorable() {
            self.remove(pair.replica(), replica, RemovalCause::Orphaned, failures);
            return Ok(());
        }

        match (source.is_dir(), replica.is_dir()) {
            (true, true) => {
                let names = io::read_dir_sorted_or_empty(pair.replica())?;
                push_children(pending, pair, names);
            }
            (false, false) => {}
            _ => {
                self.stats.type_mismatches += 1;
                self.remove(pair.replica(), replica, RemovalCause::TypeMismatch, failures);
            }
        }
        Ok(())
    }

    fn remove(
        &mut self,
        path: &Path,
        kind: NodeKind,
        cause: RemovalCause,
        failures: &mut Vec<mirror_fs::Error>,
    ) {
        let result = if kind.is_dir() {
            self.remove_tree(path, cause, failures);
            Ok(())
        } else {
            self.remove_file(path, cause)
        };
        if let Err(e) = result {
            failures.push(e);
        }
    }

    fn remove_file(&mut self, path: &Path, cause: RemovalCause) -> mirror_fs::Result<()> {
        if io::remove_file(path)? {
            self.stats.files_removed += 1;
            self.reporter.report(SyncEvent::FileRemoved {
                path: path.to_path_buf(),
                cause,
            });
        }
        Ok(())
    }

    /// Remove a directory and everything under it, children before parents,
    /// without following links.
    fn remove_tree(&mut self, root: &Path, cause: RemovalCause, failures: &mut Vec<mirror_fs::Error>) {
        let mut stack = vec![Removal::Enter(root.to_path_buf())];

        while let Some(step) = stack.pop() {
            let result = match step {
                Removal::Enter(path) => match NodeKind::probe(&path) {
                    Ok(NodeKind::Directory) => io::read_dir_sorted_or_empty(&path).map(|names| {
                        let children = names.iter().rev().map(|name| Removal::Enter(path.join(name)));
                        stack.push(Removal::Leave(path.clone()));
                        stack.extend(children);
                    }),
                    Ok(NodeKind::Missing) => Ok(()),
                    Ok(_) => self.remove_file(&path, cause),
                    Err(e) => Err(e),
                },
                Removal::Leave(path) => io::remove_dir(&path).map(|removed| {
                    if removed {
                        self.stats.dirs_removed += 1;
                        self.reporter.report(SyncEvent::DirectoryRemoved { path, cause });
                    }
                }),
            };
            if let Err(e) = result {
                failures.push(e);
            }
        }
    }
}
