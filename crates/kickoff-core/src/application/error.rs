//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during setup orchestration.
#[derive(Debug, Error, Clone)]
pub enum SetupError {
    /// Hard precondition: the target path does not exist.
    #[error("{path} does not exist!")]
    MissingPath { path: PathBuf },

    /// Hard precondition: no manifest file directly under the target path.
    #[error("{path} does not exist! Invalid Laravel project.")]
    MissingManifest { path: PathBuf },

    /// Hard precondition: no framework entry-point file under the target path.
    #[error("Missing required file: {path}. Not a valid Laravel project.")]
    MissingEntrypoint { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command could not be spawned.
    #[error("Failed to spawn '{command}': {reason}")]
    CommandSpawn { command: String, reason: String },

    /// An external command exited with a non-zero status.
    #[error("'{command}' exited with {status}")]
    CommandFailed { command: String, status: i32 },

    /// The stub payload is unusable (empty builtin tree or missing directory).
    #[error("Stub source unavailable: {reason}")]
    StubsUnavailable { reason: String },
}

impl SetupError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPath { path } => vec![
                format!("Create the project first: laravel new {}", path.display()),
                "Or pass the path of an existing Laravel project".into(),
            ],
            Self::MissingManifest { path } => vec![
                format!("No composer.json found at {}", path.display()),
                "Point kickoff at the root of a Laravel project".into(),
            ],
            Self::MissingEntrypoint { path } => vec![
                format!("No artisan script found at {}", path.display()),
                "Point kickoff at the root of a Laravel project".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CommandSpawn { command, .. } => vec![
                format!("Could not start: {}", command),
                "Ensure the binary is installed and in your PATH".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Command failed: {}", command),
                "Re-run with -v to stream the command's own output".into(),
            ],
            Self::StubsUnavailable { .. } => vec![
                "Check the directory passed via --stubs".into(),
                "Omit --stubs to use the builtin payload".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPath { .. }
            | Self::MissingManifest { .. }
            | Self::MissingEntrypoint { .. } => ErrorCategory::Precondition,
            Self::FilesystemError { .. }
            | Self::CommandSpawn { .. }
            | Self::CommandFailed { .. } => ErrorCategory::Internal,
            Self::StubsUnavailable { .. } => ErrorCategory::Validation,
        }
    }
}
