//! The project manifest (composer.json) as an ordered document.
//!
//! The manifest is merged, never replaced: the three known keys
//! (`autoload.files`, `config.allow-plugins`, `scripts`) are set or merged,
//! and every other key round-trips byte-identically. Key order is preserved
//! (`serde_json` with `preserve_order`), and serialization is pretty-printed
//! with forward slashes left unescaped - the format consumers diff in
//! version control.

use serde_json::{Map, Value, json};

use crate::domain::DomainError;

/// An insertion-ordered view of the target project's manifest file.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest from its JSON text.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DomainError::ManifestParse {
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(DomainError::ManifestNotAnObject),
        }
    }

    /// Serialize back with stable formatting: pretty-printed, slashes
    /// unescaped, trailing newline.
    pub fn to_pretty_string(&self) -> String {
        // serde_json never escapes forward slashes, so the formatting
        // contract only needs pretty-printing here.
        let mut text = serde_json::to_string_pretty(&Value::Object(self.root.clone()))
            .expect("manifest maps always serialize");
        text.push('\n');
        text
    }

    /// Replace `autoload.files`, preserving sibling autoload keys (psr-4, ...).
    pub fn set_autoload_files(&mut self, files: &[&str]) {
        let autoload = self.object_entry("autoload");
        autoload.insert("files".into(), json!(files));
    }

    /// Merge one entry into `config.allow-plugins`, preserving other plugins.
    pub fn allow_plugin(&mut self, plugin: &str, allowed: bool) {
        let config = self.object_entry("config");
        let plugins = match config
            .entry("allow-plugins".to_string())
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(map) => map,
            other => {
                // A scalar `allow-plugins: true/false` is legal composer
                // syntax; promote it to a map so the entry can be merged.
                *other = Value::Object(Map::new());
                other.as_object_mut().expect("just assigned an object")
            }
        };
        plugins.insert(plugin.into(), Value::Bool(allowed));
    }

    /// Replace the named-script map wholesale.
    pub fn set_scripts(&mut self, scripts: Map<String, Value>) {
        self.root.insert("scripts".into(), Value::Object(scripts));
    }

    /// Read-only access to a top-level key (testing and inspection).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Fetch or create a top-level object entry.
    fn object_entry(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self
            .root
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut().expect("entry is an object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "acme/demo",
        "type": "project",
        "require": { "php": "^8.4" },
        "autoload": {
            "psr-4": { "App\\": "app/" }
        },
        "config": {
            "optimize-autoloader": true,
            "allow-plugins": { "php-http/discovery": true }
        },
        "minimum-stability": "stable"
    }"#;

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(
            Manifest::parse("{ nope"),
            Err(DomainError::ManifestParse { .. })
        ));
    }

    #[test]
    fn parse_rejects_non_object_roots() {
        assert_eq!(
            Manifest::parse("[1, 2]"),
            Err(DomainError::ManifestNotAnObject)
        );
    }

    #[test]
    fn autoload_files_preserves_psr4_sibling() {
        let mut m = Manifest::parse(SAMPLE).unwrap();
        m.set_autoload_files(&["support/helpers.php"]);

        let autoload = m.get("autoload").unwrap();
        assert_eq!(autoload["files"], json!(["support/helpers.php"]));
        assert_eq!(autoload["psr-4"]["App\\"], json!("app/"));
    }

    #[test]
    fn allow_plugin_merges_with_existing_plugins() {
        let mut m = Manifest::parse(SAMPLE).unwrap();
        m.allow_plugin("pestphp/pest-plugin", true);

        let plugins = &m.get("config").unwrap()["allow-plugins"];
        assert_eq!(plugins["pestphp/pest-plugin"], json!(true));
        assert_eq!(plugins["php-http/discovery"], json!(true));
        // Sibling config keys survive too.
        assert_eq!(m.get("config").unwrap()["optimize-autoloader"], json!(true));
    }

    #[test]
    fn allow_plugin_promotes_scalar_allow_plugins() {
        let mut m = Manifest::parse(r#"{ "config": { "allow-plugins": true } }"#).unwrap();
        m.allow_plugin("pestphp/pest-plugin", true);
        assert_eq!(
            m.get("config").unwrap()["allow-plugins"]["pestphp/pest-plugin"],
            json!(true)
        );
    }

    #[test]
    fn scripts_are_replaced_wholesale() {
        let mut m =
            Manifest::parse(r#"{ "scripts": { "old": "gone" }, "name": "x/y" }"#).unwrap();

        let mut scripts = Map::new();
        scripts.insert("test".into(), json!("@php vendor/bin/pest"));
        m.set_scripts(scripts);

        let out = m.get("scripts").unwrap().as_object().unwrap();
        assert!(out.get("old").is_none());
        assert_eq!(out["test"], json!("@php vendor/bin/pest"));
    }

    #[test]
    fn untouched_keys_round_trip_verbatim() {
        let mut m = Manifest::parse(SAMPLE).unwrap();
        m.set_autoload_files(&["support/helpers.php"]);
        m.allow_plugin("pestphp/pest-plugin", true);
        m.set_scripts(Map::new());

        let reparsed = Manifest::parse(&m.to_pretty_string()).unwrap();
        for key in ["name", "type", "require", "minimum-stability"] {
            assert_eq!(
                reparsed.get(key),
                Manifest::parse(SAMPLE).unwrap().get(key),
                "key '{key}' was disturbed"
            );
        }
    }

    #[test]
    fn key_order_is_preserved() {
        let m = Manifest::parse(SAMPLE).unwrap();
        let keys: Vec<&str> = m.root.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "name",
                "type",
                "require",
                "autoload",
                "config",
                "minimum-stability"
            ]
        );
    }

    #[test]
    fn pretty_output_keeps_slashes_and_ends_with_newline() {
        let m = Manifest::parse(r#"{ "scripts": { "analyse": "vendor/bin/phpstan" } }"#).unwrap();
        let text = m.to_pretty_string();
        assert!(text.contains("vendor/bin/phpstan"));
        assert!(!text.contains("vendor\\/bin"));
        assert!(text.ends_with('\n'));
    }
}
