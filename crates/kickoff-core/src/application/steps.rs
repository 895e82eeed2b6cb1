//! The step runner - best-effort, fire-and-forget execution of named units
//! of work.
//!
//! A failing step is reported and tallied, never retried, and never aborts
//! the run: the design maximises the chance that a partially-configured
//! project is still mostly usable rather than halting at the first failing
//! optional step (a package that fails to install, a vendor-publish tag that
//! doesn't exist in some package version).

use tracing::{debug, warn};

use crate::application::ports::ProgressReporter;
use crate::error::KickoffResult;

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

/// Executes steps sequentially, reporting each through the progress port.
pub struct StepRunner<'a> {
    reporter: &'a dyn ProgressReporter,
    total: usize,
    failed: usize,
}

impl<'a> StepRunner<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter) -> Self {
        Self {
            reporter,
            total: 0,
            failed: 0,
        }
    }

    /// Run one named unit of work.
    ///
    /// Errors are terminal-per-step only: the failure is reported and the
    /// runner stays usable for subsequent steps.
    pub fn run(
        &mut self,
        description: &str,
        action: impl FnOnce() -> KickoffResult<()>,
    ) -> StepOutcome {
        self.total += 1;
        self.reporter.step_started(description);

        match action() {
            Ok(()) => {
                debug!(step = description, "step succeeded");
                self.reporter.step_succeeded();
                StepOutcome::Succeeded
            }
            Err(e) => {
                warn!(step = description, error = %e, "step failed, continuing");
                self.failed += 1;
                self.reporter.step_failed(&e);
                StepOutcome::Failed
            }
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::KickoffError;

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn step_started(&self, description: &str) {
            self.events.lock().unwrap().push(format!("start:{description}"));
        }

        fn step_succeeded(&self) {
            self.events.lock().unwrap().push("ok".into());
        }

        fn step_failed(&self, error: &KickoffError) {
            self.events.lock().unwrap().push(format!("err:{error}"));
        }
    }

    fn boom() -> KickoffResult<()> {
        Err(KickoffError::Internal {
            message: "boom".into(),
        })
    }

    #[test]
    fn success_is_reported_in_order() {
        let reporter = RecordingReporter::default();
        let mut runner = StepRunner::new(&reporter);

        let outcome = runner.run("Copy application stubs", || Ok(()));

        assert_eq!(outcome, StepOutcome::Succeeded);
        assert_eq!(
            *reporter.events.lock().unwrap(),
            vec!["start:Copy application stubs".to_string(), "ok".into()]
        );
    }

    #[test]
    fn failure_does_not_poison_the_runner() {
        let reporter = RecordingReporter::default();
        let mut runner = StepRunner::new(&reporter);

        assert_eq!(runner.run("first", boom), StepOutcome::Failed);
        assert_eq!(runner.run("second", || Ok(())), StepOutcome::Succeeded);

        assert_eq!(runner.total(), 2);
        assert_eq!(runner.failed(), 1);
    }

    #[test]
    fn later_steps_run_after_a_failure() {
        let reporter = RecordingReporter::default();
        let mut runner = StepRunner::new(&reporter);
        let mut side_effect = false;

        runner.run("failing", boom);
        runner.run("following", || {
            side_effect = true;
            Ok(())
        });

        assert!(side_effect, "step after a failure must still execute");
    }
}
