//! Unified error handling for Kickoff Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::SetupError;
use crate::domain::DomainError;

/// Root error type for Kickoff Core operations.
///
/// This enum wraps all possible errors that can occur when using kickoff-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum KickoffError {
    /// Errors from the domain layer (business logic violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KickoffError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Setup(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Kickoff".into(),
                "Please report this issue at: https://github.com/kickoff-tool/kickoff/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Setup(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` for the hard-stop checks that abort a run before any step fires.
    pub fn is_precondition(&self) -> bool {
        matches!(self.category(), ErrorCategory::Precondition)
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Precondition,
    Internal,
}

/// Convenient result type alias.
pub type KickoffResult<T> = Result<T, KickoffError>;
