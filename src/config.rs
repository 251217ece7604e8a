//! Configuration for kb
//!
//! Loaded from `.kb.toml` at the board root. Every field has a default, so a
//! missing file is the default configuration, not an error.
//!
//! ```toml
//! [user]
//! name = "Ann"
//!
//! [board]
//! default_statuses = ["To Do", "In Progress", "Done"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file name at the board root
pub const FILE_NAME: &str = ".kb.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user: UserConfig,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Display name used as default author and inviter
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Columns seeded into every new project
    pub default_statuses: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_statuses: default_statuses(),
        }
    }
}

fn default_statuses() -> Vec<String> {
    vec![
        "To Do".to_string(),
        "In Progress".to_string(),
        "Done".to_string(),
    ]
}

impl Config {
    /// Load configuration from `<root>/.kb.toml`, falling back to defaults
    /// when the file does not exist
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board.default_statuses.is_empty() {
            return Err(Error::InvalidConfig(
                "board.default_statuses must not be empty".to_string(),
            ));
        }
        for name in &self.board.default_statuses {
            if name.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "board.default_statuses entries must not be empty".to_string(),
                ));
            }
        }
        let mut seen: Vec<&str> = Vec::new();
        for name in &self.board.default_statuses {
            if seen.contains(&name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate default status '{name}'"
                )));
            }
            seen.push(name);
        }
        if let Some(name) = &self.user.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "user.name must not be empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Configured author name, if any
    pub fn author(&self) -> Option<&str> {
        self.user.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(
            config.board.default_statuses,
            vec!["To Do", "In Progress", "Done"]
        );
        assert!(config.author().is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(FILE_NAME), "[user]\nname = \"Ann\"\n").unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.author(), Some("Ann"));
        assert_eq!(config.board.default_statuses.len(), 3);
    }

    #[test]
    fn empty_default_statuses_is_invalid() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(FILE_NAME),
            "[board]\ndefault_statuses = []\n",
        )
        .unwrap();

        let err = Config::load(temp.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn duplicate_default_statuses_are_invalid() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(FILE_NAME),
            "[board]\ndefault_statuses = [\"Done\", \"Done\"]\n",
        )
        .unwrap();

        assert!(Config::load(temp.path()).is_err());
    }

    #[test]
    fn blank_user_name_is_invalid() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(FILE_NAME), "[user]\nname = \"  \"\n").unwrap();

        assert!(Config::load(temp.path()).is_err());
    }
}
