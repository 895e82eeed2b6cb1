//! Placeholder tokens and their substitution.
//!
//! Substitution is a single-pass literal replace, applied only to an explicit
//! allow-list of generated files (see `SetupService`) - never blindly to the
//! whole copied tree.

use crate::domain::Project;

/// Placeholder replaced with the resolved project name.
pub const PROJECT_NAME_TOKEN: &str = "${PROJECT_NAME}";

/// Placeholder replaced with the resolved project owner.
pub const OWNER_TOKEN: &str = "${OWNER}";

/// Replace both placeholder tokens in `content` with the project's values.
pub fn substitute_tokens(content: &str, project: &Project) -> String {
    content
        .replace(PROJECT_NAME_TOKEN, project.name())
        .replace(OWNER_TOKEN, project.owner())
}
