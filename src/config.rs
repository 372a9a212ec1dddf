//! Configuration module for sidediff
//!
//! Loads user configuration from ~/.sidediff/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Number of context lines kept at each edge of a folded section (default 3)
    pub context_lines: usize,
    /// Start with long unchanged sections folded
    pub fold: bool,
    /// Draw alignment brackets in the divider column of changed sections
    pub brackets: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_lines: 3,
            fold: false,
            brackets: true,
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sidediff")
            .join("config.toml")
    }

    /// Merge CLI overrides into config
    pub fn with_overrides(mut self, fold: Option<bool>, context_lines: Option<usize>) -> Self {
        if let Some(fold) = fold {
            self.fold = fold;
        }
        if let Some(ctx) = context_lines {
            self.context_lines = ctx;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.context_lines, 3);
        assert!(!config.fold);
        assert!(config.brackets);
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(Some(true), Some(5));
        assert!(config.fold);
        assert_eq!(config.context_lines, 5);

        let config = Config::default().with_overrides(None, None);
        assert!(!config.fold);
        assert_eq!(config.context_lines, 3);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("fold = true").unwrap();
        assert!(config.fold);
        assert_eq!(config.context_lines, 3);
        assert!(config.brackets);
    }
}
