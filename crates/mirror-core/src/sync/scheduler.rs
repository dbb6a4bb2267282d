//! Fixed-count, fixed-interval pass scheduling

use std::time::Duration;

use chrono::Utc;
use mirror_fs::PathPair;

use super::copier::TreeCopier;
use super::pruner::TreePruner;
use super::report::{PassReport, ScheduleReport};
use crate::config::Schedule;
use crate::reporter::{Reporter, SyncEvent};

/// Waits between passes.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> std::io::Result<()>;
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) -> std::io::Result<()> {
        std::thread::sleep(duration);
        Ok(())
    }
}

/// Where a [`Scheduler`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// About to run the given 1-based pass
    Running { pass: u32 },
    /// About to wait after the given pass
    Sleeping { after: u32 },
    Done,
}

/// Runs a fixed number of copy-then-prune passes with a pause in between.
///
/// A pass that fails on some entries is logged and counted, never retried
/// in place and never fatal: the scheduler always reaches
/// [`SchedulerState::Done`] after the last pass. There is no cancellation;
/// stopping early means stopping the process.
pub struct Scheduler<'a> {
    paths: PathPair,
    schedule: Schedule,
    reporter: &'a dyn Reporter,
    sleeper: &'a dyn Sleeper,
    state: SchedulerState,
    report: ScheduleReport,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        paths: PathPair,
        schedule: Schedule,
        reporter: &'a dyn Reporter,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            paths,
            schedule,
            reporter,
            sleeper,
            state: SchedulerState::Idle,
            report: ScheduleReport::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Perform the work of the current state and move to the next one.
    pub fn step(&mut self) -> SchedulerState {
        let total = self.schedule.total();
        self.state = match self.state {
            SchedulerState::Idle => SchedulerState::Running { pass: 1 },
            SchedulerState::Running { pass } => {
                let report = run_pass(&self.paths, pass, total, self.reporter);
                self.report.passes.push(report);
                if pass < total {
                    SchedulerState::Sleeping { after: pass }
                } else {
                    SchedulerState::Done
                }
            }
            SchedulerState::Sleeping { after } => {
                if let Err(e) = self.sleeper.sleep(self.schedule.interval) {
                    self.report.sleep_failures += 1;
                    self.reporter.report(SyncEvent::SleepFailed {
                        error: e.to_string(),
                    });
                }
                SchedulerState::Running { pass: after + 1 }
            }
            SchedulerState::Done => SchedulerState::Done,
        };
        self.state
    }

    /// Step until done and return what happened.
    pub fn run(mut self) -> ScheduleReport {
        while self.step() != SchedulerState::Done {}
        self.report
    }
}

/// Run one full pass: copy the source into the replica, then prune the
/// replica against the source.
///
/// The prune walk runs even when the copy walk reported failures, but
/// removes nothing if the source root cannot be listed. Every failure is
/// reported as [`SyncEvent::SyncFailed`]; the finish event is reported
/// regardless.
pub fn run_pass(paths: &PathPair, pass: u32, total: u32, reporter: &dyn Reporter) -> PassReport {
    reporter.report(SyncEvent::PassStarted { pass, total });
    let started_at = Utc::now();

    let mut copier = TreeCopier::new(reporter);
    let copied = copier.copy_folder(paths);
    let mut pruner = TreePruner::new(reporter);
    let pruned = pruner.delete(paths);

    let errors: Vec<String> = [copied, pruned]
        .into_iter()
        .filter_map(Result::err)
        .flat_map(|e| e.causes())
        .collect();
    for error in &errors {
        reporter.report(SyncEvent::SyncFailed {
            pass,
            error: error.clone(),
        });
    }

    reporter.report(SyncEvent::PassFinished {
        pass,
        total,
        failed: !errors.is_empty(),
    });

    PassReport {
        pass,
        started_at,
        finished_at: Utc::now(),
        copy: copier.stats(),
        prune: pruner.stats(),
        errors,
    }
}
