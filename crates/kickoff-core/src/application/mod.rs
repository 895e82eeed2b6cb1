//! Application layer for Kickoff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SetupService, ManifestEditor)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod steps;

// Re-export main services
pub use services::{ManifestEditor, RunSummary, SetupService};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, ProgressReporter};

pub use error::SetupError;
pub use steps::StepRunner;
