//! Recording (spy) command runner for tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kickoff_core::{
    application::{SetupError, ports::CommandRunner},
    error::KickoffResult,
};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub command: String,
    pub dir: PathBuf,
    pub verbose: bool,
}

/// Spy runner: records every invocation instead of spawning anything.
///
/// Commands succeed unless their text contains one of the configured failure
/// substrings, which lets tests simulate a failing package install without a
/// real package manager.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<RecordingRunnerInner>>,
}

#[derive(Debug, Default)]
struct RecordingRunnerInner {
    commands: Vec<RecordedCommand>,
    fail_matching: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command whose text contains `substring` fail with a
    /// non-zero status.
    pub fn fail_when(&self, substring: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .fail_matching
            .push(substring.into());
    }

    /// All invocations recorded so far, in order.
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.inner.lock().unwrap().commands.clone()
    }

    /// `true` if nothing was ever invoked.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().commands.is_empty()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, dir: &Path, verbose: bool) -> KickoffResult<()> {
        let mut inner = self.inner.lock().unwrap();

        inner.commands.push(RecordedCommand {
            command: command.to_string(),
            dir: dir.to_path_buf(),
            verbose,
        });

        if inner.fail_matching.iter().any(|s| command.contains(s)) {
            return Err(SetupError::CommandFailed {
                command: command.to_string(),
                status: 1,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let runner = RecordingRunner::new();
        runner.run("first", Path::new("/p"), false).unwrap();
        runner.run("second", Path::new("/p"), true).unwrap();

        let commands = runner.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].command, "first");
        assert!(commands[1].verbose);
    }

    #[test]
    fn configured_failures_fail() {
        let runner = RecordingRunner::new();
        runner.fail_when("composer");

        assert!(runner.run("composer require x", Path::new("/p"), false).is_err());
        assert!(runner.run("npm install", Path::new("/p"), false).is_ok());
        assert_eq!(runner.commands().len(), 2);
    }
}
