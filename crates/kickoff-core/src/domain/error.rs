//! Domain-layer errors (business rule violations).

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised by pure domain logic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The project name failed validation.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A manifest document could not be parsed.
    #[error("Invalid manifest: {reason}")]
    ManifestParse { reason: String },

    /// The manifest parsed, but its top level is not a JSON object.
    #[error("Invalid manifest: top-level value must be an object")]
    ManifestNotAnObject,
}

impl DomainError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Any non-empty name works; it is snake_cased for the database".into(),
            ],
            Self::ManifestParse { reason } => vec![
                format!("composer.json could not be parsed: {}", reason),
                "Validate the file with: composer validate".into(),
            ],
            Self::ManifestNotAnObject => vec![
                "composer.json must contain a JSON object at its top level".into(),
                "Validate the file with: composer validate".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
