//! Cross-crate scenarios: validated configuration through the scheduler
//!
//! These run the same path the `mirror` binary takes, minus argument parsing,
//! and inspect both the trees and the emitted events.

use mirror_core::{
    MemoryReporter, RemovalCause, Reporter, Scheduler, Sleeper, SyncConfig, SyncEvent,
    TracingReporter,
};
use mirror_test_utils::TestTrees;
use std::cell::RefCell;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records requested sleeps instead of blocking.
#[derive(Default)]
struct RecordingSleeper {
    naps: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> io::Result<()> {
        self.naps.borrow_mut().push(duration);
        Ok(())
    }
}

fn config(trees: &TestTrees, interval: i64, passes: i64) -> SyncConfig {
    SyncConfig::new(
        trees.source(),
        trees.replica(),
        interval,
        passes,
        trees.root().join("sync.log"),
    )
    .unwrap()
}

fn run(config: SyncConfig, reporter: &dyn Reporter, sleeper: &dyn Sleeper) -> mirror_core::ScheduleReport {
    Scheduler::new(config.paths, config.schedule, reporter, sleeper).run()
}

// =============================================================================
// Scenarios
// =============================================================================

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn initial_sync_copies_two_files_and_removes_nothing() {
        let trees = TestTrees::new();
        trees.source_file("a.txt", "hi");
        trees.source_file("sub/b.txt", "bee");
        let reporter = MemoryReporter::new();

        let report = run(config(&trees, 0, 1), &reporter, &RecordingSleeper::default());

        trees.assert_mirrored();
        assert_eq!(trees.read_replica("a.txt"), "hi");
        let copies = reporter
            .events()
            .into_iter()
            .filter(|e| matches!(e, SyncEvent::FileCopied { .. }))
            .count();
        let removals = reporter
            .events()
            .into_iter()
            .filter(|e| matches!(e, SyncEvent::FileRemoved { .. } | SyncEvent::DirectoryRemoved { .. }))
            .count();
        assert_eq!(copies, 2);
        assert_eq!(removals, 0);
        assert_eq!(report.clean_passes(), 1);
    }

    #[test]
    fn empty_source_empties_replica_in_name_order() {
        let trees = TestTrees::new();
        trees.replica_file("old.txt", "o");
        trees.replica_file("old_dir/child.txt", "c");
        let replica = trees.replica();
        let reporter = MemoryReporter::new();

        run(config(&trees, 0, 1), &reporter, &RecordingSleeper::default());

        assert!(trees.replica_snapshot().is_empty());
        assert_eq!(
            reporter.mutations(),
            vec![
                SyncEvent::FileRemoved {
                    path: replica.join("old.txt"),
                    cause: RemovalCause::Orphaned,
                },
                SyncEvent::FileRemoved {
                    path: replica.join("old_dir").join("child.txt"),
                    cause: RemovalCause::Orphaned,
                },
                SyncEvent::DirectoryRemoved {
                    path: replica.join("old_dir"),
                    cause: RemovalCause::Orphaned,
                },
            ]
        );
    }

    #[test]
    fn missing_replica_root_is_created() {
        let trees = TestTrees::new();
        trees.source_file("deep/er/file.txt", "x");
        assert!(!trees.replica().exists());

        run(config(&trees, 0, 1), &MemoryReporter::new(), &RecordingSleeper::default());

        trees.assert_mirrored();
    }

    #[test]
    fn sleeps_only_between_passes() {
        let trees = TestTrees::new();
        trees.source_file("a.txt", "a");
        let sleeper = RecordingSleeper::default();
        let reporter = MemoryReporter::new();

        let report = run(config(&trees, 7, 3), &reporter, &sleeper);

        assert_eq!(report.passes.len(), 3);
        assert_eq!(*sleeper.naps.borrow(), vec![Duration::from_secs(7); 2]);
        let started: Vec<_> = reporter
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SyncEvent::PassStarted { pass, total } => Some((pass, total)),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn replica_converges_while_source_changes_between_passes() {
        let trees = TestTrees::new();
        trees.source_file("keep.txt", "k");
        let doomed = trees.source_file("doomed/file.txt", "d");
        let reporter = MemoryReporter::new();
        let paths = config(&trees, 0, 1).paths;

        mirror_core::run_pass(&paths, 1, 2, &reporter);
        std::fs::remove_dir_all(doomed.parent().unwrap()).unwrap();
        trees.source_file("fresh.txt", "f");
        let second = mirror_core::run_pass(&paths, 2, 2, &reporter);

        assert!(second.succeeded());
        assert_eq!(second.copy.files_copied, 1);
        assert_eq!(second.prune.files_removed, 1);
        assert_eq!(second.prune.dirs_removed, 1);
        trees.assert_mirrored();
    }
}

// =============================================================================
// Validation
// =============================================================================

mod validation {
    use super::*;
    use mirror_core::Error;

    #[test]
    fn nested_replica_is_rejected_before_anything_is_written() {
        let trees = TestTrees::new();
        trees.source_file("a.txt", "a");

        let err = SyncConfig::new(
            trees.source(),
            trees.source().join("mirror"),
            0,
            1,
            trees.root().join("sync.log"),
        )
        .unwrap_err();

        assert!(matches!(err, Error::OverlappingTrees { .. }));
        assert!(!trees.source().join("mirror").exists());
    }

    #[test]
    fn source_check_runs_before_number_checks() {
        let trees = TestTrees::new();

        let err = SyncConfig::new(trees.root().join("missing"), trees.replica(), -1, 0, "log")
            .unwrap_err();

        assert!(matches!(err, Error::SourceNotDirectory { .. }));
    }
}

// =============================================================================
// Logging through tracing
// =============================================================================

mod logging {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn tracing_reporter_writes_one_line_per_action() {
        let trees = TestTrees::new();
        trees.source_file("a.txt", "a");
        trees.replica_file("gone.txt", "g");
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            run(config(&trees, 0, 1), &TracingReporter, &RecordingSleeper::default())
        });

        let log = buffer.contents();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 4, "unexpected log:\n{log}");
        assert!(lines[0].contains("sync started"));
        assert!(lines[1].contains("file copied/updated"));
        assert!(lines[1].contains("a.txt"));
        assert!(lines[2].contains("file removed"));
        assert!(lines[2].contains("gone.txt"));
        assert!(lines[3].contains("sync done"));
    }
}
