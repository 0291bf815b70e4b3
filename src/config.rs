//! Global configuration for rtg

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::RenderOptions;

/// Global rtg configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default directory of raw notes
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Default directory for formatted notes
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Append a backlinks section to each note
    #[serde(default = "default_true")]
    pub backlinks: bool,

    /// Append an unlinked references section to each note
    #[serde(default = "default_true")]
    pub unlinked_references: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: None,
            destination: None,
            backlinks: true,
            unlinked_references: true,
        }
    }
}

impl Config {
    /// Load config from default location (~/.config/rtg/config.toml)
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(config)
    }

    /// Get default config file path
    /// Checks ~/.config/rtg/config.toml first (XDG style),
    /// then falls back to OS-specific location
    pub fn default_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("rtg").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rtg")
            .join("config.toml")
    }

    /// Create default config file if it doesn't exist
    pub fn create_default() -> Result<PathBuf> {
        let config_path = Self::default_path();

        if config_path.exists() {
            return Ok(config_path);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let default_config = r#"# rtg configuration

# Directory of raw notes (uncomment and set your path)
# source = "/path/to/notes"

# Directory the formatted notes are written to
# destination = "/path/to/formatted"

# Sections appended to every note
backlinks = true
unlinked_references = true
"#;

        std::fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

        Ok(config_path)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            backlinks: self.backlinks,
            unlinked_references: self.unlinked_references,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert!(config.source.is_none());
        assert!(config.backlinks);
        assert!(config.unlinked_references);
    }

    #[test]
    fn test_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "source = \"/notes\"\ndestination = \"/out\"\nunlinked_references = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let options = config.render_options();

        assert_eq!(config.source, Some(PathBuf::from("/notes")));
        assert_eq!(config.destination, Some(PathBuf::from("/out")));
        assert!(options.backlinks);
        assert!(!options.unlinked_references);
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backlinks = \"maybe\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
