//! TOML-backed config store
//!
//! ```toml
//! editor = "vim"
//! git_protocol = "https"
//!
//! [hosts."github.example.com"]
//! git_protocol = "ssh"
//! ```
//!
//! Top-level keys are global values; `[hosts."<scope>"]` tables override
//! them for one scope.

use crate::error::ConfigError;
use crate::sources::ConfigStore;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

/// Settings parsed from a TOML config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TomlConfigStore {
    root: Table,
}

impl TomlConfigStore {
    /// Parse a store from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let root: Table = contents.parse()?;
        Ok(Self { root })
    }

    /// Load a store from `path`.
    ///
    /// A missing file is an empty store, not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {path:?}, using empty store");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn scoped(&self, scope: &str, key: &str) -> Option<&Value> {
        self.root
            .get("hosts")
            .and_then(Value::as_table)
            .and_then(|hosts| hosts.get(scope))
            .and_then(Value::as_table)
            .and_then(|table| table.get(key))
    }
}

impl ConfigStore for TomlConfigStore {
    fn get(&self, scope: &str, key: &str) -> Result<String, ConfigError> {
        let found = self.scoped(scope, key).or_else(|| match self.root.get(key) {
            // The hosts table itself is not a setting.
            Some(_) if key == "hosts" => None,
            other => other,
        });

        match found {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(ConfigError::NotAString {
                key: key.to_string(),
                found: other.type_str(),
            }),
        }
    }
}

/// Default config file location under `home`.
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(".config/strata/config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
editor = "vim"
git_protocol = "https"

[hosts."github.com"]
git_protocol = "ssh"

[hosts."ghe.example.com"]
editor = "emacs"
retries = 3
"#;

    #[test]
    fn test_global_value() {
        let store = TomlConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("github.com", "editor").unwrap(), "vim");
    }

    #[test]
    fn test_scope_overrides_global() {
        let store = TomlConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("github.com", "git_protocol").unwrap(), "ssh");
        assert_eq!(store.get("ghe.example.com", "git_protocol").unwrap(), "https");
        assert_eq!(store.get("ghe.example.com", "editor").unwrap(), "emacs");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let store = TomlConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("github.com", "pager").unwrap(), "");
        assert_eq!(store.get("unknown.host", "pager").unwrap(), "");
    }

    #[test]
    fn test_hosts_table_is_not_a_setting() {
        let store = TomlConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("github.com", "hosts").unwrap(), "");
    }

    #[test]
    fn test_non_string_value_fails() {
        let store = TomlConfigStore::parse(SAMPLE).unwrap();
        let err = store.get("ghe.example.com", "retries").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotAString { ref key, found: "integer" } if key == "retries"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let result = TomlConfigStore::parse("invalid toml [[[");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlConfigStore::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(store, TomlConfigStore::default());
        assert_eq!(store.get("github.com", "editor").unwrap(), "");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = default_config_path(temp_dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, SAMPLE).unwrap();

        let store = TomlConfigStore::load(&path).unwrap();
        assert_eq!(store.get("github.com", "git_protocol").unwrap(), "ssh");
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path(Path::new("/home/dev"));
        assert_eq!(path, PathBuf::from("/home/dev/.config/strata/config.toml"));
    }
}
