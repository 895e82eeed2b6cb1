//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config`, or the default location)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Stub payload settings.
    pub stubs: StubConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StubConfig {
    /// Directory used instead of the builtin payload (same effect as the
    /// `--stubs` flag, which takes precedence).
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicitly passed `--config` file must exist and parse; the default
    /// location is optional and silently falls back to defaults when absent.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kickoff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "kickoff", "kickoff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kickoff.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_stub_override() {
        let cfg = AppConfig::default();
        assert!(cfg.stubs.local_path.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_default_location_falls_back_to_defaults() {
        // No --config flag: loading must not error even without a file.
        let cfg = AppConfig::load(None).unwrap();
        assert!(cfg.stubs.local_path.is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/a/config.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[stubs]\nlocal_path = \"/srv/stubs\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.stubs.local_path, Some(PathBuf::from("/srv/stubs")));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn config_path_is_nonempty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
