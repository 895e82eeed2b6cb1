//! Kickoff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kickoff
//! project bootstrapping tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kickoff-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (SetupService, ManifestEditor)       │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Driven: Filesystem, Runner, Reporter)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kickoff-adapters (Infrastructure)   │
//! │  (LocalFilesystem, ShellRunner, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │    (Project, Manifest, StubTree)        │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kickoff_core::{
//!     application::SetupService,
//!     domain::{Project, StubSource},
//! };
//!
//! // 1. Describe the target project
//! let project = Project::new("acme", "Demo App", "/tmp/demo").unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = SetupService::new(filesystem, runner, reporter);
//! service.check_preconditions(&project).unwrap();
//! service.run(&project, &StubSource::Builtin(stubs), false);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ManifestEditor, RunSummary, SetupService,
        ports::{CommandRunner, Filesystem, ProgressReporter},
    };
    pub use crate::domain::{Manifest, Project, StubFile, StubSource, StubTree};
    pub use crate::error::{KickoffError, KickoffResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
