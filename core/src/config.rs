use std::path::{Component, Path};

use serde::Deserialize;

use crate::{Error, Result};

/// Directory name used for the store when none is configured.
pub const DEFAULT_STORE_DIR: &str = "git-meta";

// Entries that git itself keeps directly inside a git directory.
const RESERVED: &[&str] = &[
    "HEAD",
    "FETCH_HEAD",
    "ORIG_HEAD",
    "config",
    "description",
    "hooks",
    "index",
    "info",
    "logs",
    "modules",
    "objects",
    "packed-refs",
    "refs",
    "worktrees",
];

/// Settings for a keyed store placed inside a git directory.
///
/// Embedding programs can deserialize this from their own configuration
/// files; any missing field falls back to its default.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the subdirectory of the git directory that holds records.
    pub store_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_dir: DEFAULT_STORE_DIR.to_owned(),
        }
    }
}

impl StoreConfig {
    /// Create a validated configuration with the given store directory name.
    pub fn new<S: Into<String>>(store_dir: S) -> Result<Self> {
        let config = StoreConfig {
            store_dir: store_dir.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that `store_dir` names exactly one directory and doesn't
    /// shadow anything git keeps in its own directory.
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.store_dir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(Error::InvalidConfig(format!(
                    "store_dir {:?} must be a single directory name",
                    self.store_dir
                )))
            }
        }

        if RESERVED.contains(&self.store_dir.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "store_dir {:?} collides with git's own layout",
                self.store_dir
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ErrorKind;

    #[test]
    fn default_is_git_meta() {
        let config = StoreConfig::default();
        assert_eq!(config.store_dir, "git-meta");
        config.validate().unwrap();
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());

        let config: StoreConfig = serde_json::from_str(r#"{"store_dir": "notes"}"#).unwrap();
        assert_eq!(config.store_dir, "notes");
    }

    #[test]
    fn rejects_nested_and_relative_names() {
        for bad in &["", ".", "..", "a/b", "../up", "/abs"] {
            let err = StoreConfig::new(*bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "accepted {:?}", bad);
        }
    }

    #[test]
    fn rejects_git_internals() {
        for bad in &["objects", "refs", "HEAD", "hooks"] {
            match StoreConfig::new(*bad).unwrap_err() {
                Error::InvalidConfig(msg) => assert!(msg.contains("collides")),
                err => panic!("Unexpected error {:?}", err),
            }
        }
    }
}
