//! The project descriptor - who owns the project, what it is called, and
//! where it lives on disk.

use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// Immutable description of the target project.
///
/// Constructed once from CLI arguments at invocation start; read-only for the
/// remainder of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    owner: String,
    name: String,
    path: PathBuf,
}

impl Project {
    /// Build a descriptor, validating the project name.
    ///
    /// The path is taken as-is; whether it exists on disk is checked by the
    /// precondition validator, not here.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidProjectName {
                name,
                reason: "name cannot be empty".into(),
            });
        }

        Ok(Self {
            owner: owner.into(),
            name,
            path: path.into(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of the project's manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join("composer.json")
    }

    /// Absolute path of the framework entry-point file.
    ///
    /// Its presence is what marks a directory as a valid project.
    pub fn entrypoint_path(&self) -> PathBuf {
        self.path.join("artisan")
    }

    /// Derive the database identifier from the project name.
    ///
    /// Lowercases, replaces every run of non-word characters with a single
    /// underscore, collapses repeated underscores, and trims leading/trailing
    /// underscores. Total and idempotent for every input string.
    pub fn database_name(&self) -> String {
        derive_database_name(&self.name)
    }
}

/// Snake-case a free-form project name into a database identifier.
pub fn derive_database_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            // Any run of non-word characters (underscore included) collapses
            // to a single separator.
            out.push('_');
        }
    }

    out.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn valid_descriptor() {
        let p = Project::new("acme", "Demo App", "/tmp/demo").unwrap();
        assert_eq!(p.owner(), "acme");
        assert_eq!(p.name(), "Demo App");
        assert_eq!(p.path(), Path::new("/tmp/demo"));
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            Project::new("acme", "", "/tmp"),
            Err(DomainError::InvalidProjectName { .. })
        ));
        assert!(Project::new("acme", "   ", "/tmp").is_err());
    }

    #[test]
    fn derived_paths() {
        let p = Project::new("acme", "demo", "/srv/app").unwrap();
        assert_eq!(p.manifest_path(), PathBuf::from("/srv/app/composer.json"));
        assert_eq!(p.entrypoint_path(), PathBuf::from("/srv/app/artisan"));
    }

    // ── database name derivation ──────────────────────────────────────────

    #[test]
    fn hyphens_and_punctuation_become_single_underscores() {
        assert_eq!(derive_database_name("My-App!!"), "my_app");
        assert_eq!(derive_database_name("Kickoff Demo!!"), "kickoff_demo");
    }

    #[test]
    fn already_snake_is_unchanged() {
        assert_eq!(derive_database_name("already_snake"), "already_snake");
        assert_eq!(derive_database_name("already_ok"), "already_ok");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(derive_database_name("--lead--"), "lead");
        assert_eq!(derive_database_name("__x__"), "x");
    }

    #[test]
    fn all_separators_yields_empty() {
        assert_eq!(derive_database_name("---"), "");
        assert_eq!(derive_database_name(""), "");
    }

    #[test]
    fn derivation_is_idempotent() {
        for name in ["My-App!!", "Demo App", "a--b__c", "UPPER case", "---"] {
            let once = derive_database_name(name);
            assert_eq!(derive_database_name(&once), once, "failed for: {name}");
        }
    }

    #[test]
    fn output_alphabet_is_constrained() {
        for name in ["Ünïcode Näme", "tabs\tand\nnewlines", "emoji 🎉 name"] {
            let derived = derive_database_name(name);
            assert!(
                derived
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "unexpected characters in: {derived}"
            );
            assert!(!derived.starts_with('_'));
            assert!(!derived.ends_with('_'));
            assert!(!derived.contains("__"));
        }
    }
}
