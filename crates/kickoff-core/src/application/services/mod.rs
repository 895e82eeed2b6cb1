//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use case "bootstrap an existing Laravel project".

pub mod manifest_editor;
pub mod setup_service;

pub use manifest_editor::ManifestEditor;
pub use setup_service::{RunSummary, SetupService};
