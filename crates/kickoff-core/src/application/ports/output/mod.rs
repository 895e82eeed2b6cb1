//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kickoff-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::{KickoffError, KickoffResult};

/// Port for the filesystem templating primitives.
///
/// Implemented by:
/// - `kickoff_adapters::filesystem::LocalFilesystem` (production)
/// - `kickoff_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `ensure_*` operations are idempotent: re-running the tool against a
///   partially-set-up project never clobbers user edits
/// - `put_file` is reserved for files the tool fully owns and regenerates
/// - Permissions are capability-based (a single executable flag), not a mode
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parents; no-op if it already exists.
    fn ensure_dir(&self, path: &Path) -> KickoffResult<()>;

    /// Write `content` to `path` only if `path` does not already exist.
    /// An existing file's content is never altered, even if it differs.
    fn ensure_file(&self, path: &Path, content: &str) -> KickoffResult<()>;

    /// Unconditionally overwrite `path` with `content`.
    fn put_file(&self, path: &Path, content: &str) -> KickoffResult<()>;

    /// Recursively mirror `src` into `dst`, parents before children.
    /// Collisions with existing destination files are overwritten.
    fn copy_tree(&self, src: &Path, dst: &Path) -> KickoffResult<()>;

    /// Read a file to a string.
    fn read_file(&self, path: &Path) -> KickoffResult<String>;

    /// List the entries directly under a directory (files only).
    fn read_dir(&self, path: &Path) -> KickoffResult<Vec<PathBuf>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Set the owner-exec permission bit.
    fn set_executable(&self, path: &Path) -> KickoffResult<()>;
}

/// Port for external command invocation.
///
/// Implemented by:
/// - `kickoff_adapters::process::ShellRunner` (production)
/// - `kickoff_adapters::process::RecordingRunner` (testing spy)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Execute `command` through the system shell with `dir` as its working
    /// directory.
    ///
    /// Non-verbose: stdout and stderr are discarded. Verbose: streams pass
    /// through to the invoking process in real time. Either way the call
    /// blocks until the subprocess exits; no timeout is enforced.
    ///
    /// A non-zero exit status is an error so the enclosing step can report
    /// it; callers that want fire-and-forget semantics simply keep going.
    fn run(&self, command: &str, dir: &Path, verbose: bool) -> KickoffResult<()>;
}

/// Port for per-step progress feedback.
///
/// Implemented by the CLI's output manager in production and by a recording
/// fake in tests. The application layer never prints directly.
pub trait ProgressReporter: Send + Sync {
    /// A step is about to run; `description` names the unit of work.
    fn step_started(&self, description: &str);

    /// The step's action returned successfully.
    fn step_succeeded(&self);

    /// The step's action failed; execution continues with the next step.
    fn step_failed(&self, error: &KickoffError);
}
