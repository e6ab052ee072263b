//! Generator configuration.
//!
//! Configuration is an immutable [`GenConfig`] value constructed once at
//! process start and passed by reference into every stage — no component
//! reads ambient global state. It merges three layers, later wins:
//!
//! 1. Stock defaults.
//! 2. An optional `matbook.toml` in the drop folder.
//! 3. CLI flag overrides (source, output, recursive).
//!
//! ## Config file
//!
//! ```toml
//! # All options are optional — defaults shown below
//!
//! site_title = "MATLAB Program Documentation"
//!
//! # Override or extend the stock chapter display names
//! [chapter_names]
//! 1 = "Getting Started"
//! 12 = "Spectral Methods"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

pub const CONFIG_FILE_NAME: &str = "matbook.toml";

/// Immutable run configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Drop folder holding the program files.
    pub source: PathBuf,
    /// Output root; docs, static assets, and the sidebar live beneath it.
    pub output: PathBuf,
    /// Whether to scan subdirectories of the drop folder.
    pub recursive: bool,
    pub site_title: String,
    /// Chapter display-name overrides, keyed by decimal chapter number.
    pub chapter_names: BTreeMap<String, String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("programs"),
            output: PathBuf::from("site"),
            recursive: false,
            site_title: default_site_title(),
            chapter_names: BTreeMap::new(),
        }
    }
}

impl GenConfig {
    /// Build the effective config: defaults ← `matbook.toml` ← CLI flags.
    pub fn load(source: &Path, output: &Path, recursive: bool) -> Result<Self, ConfigError> {
        let file = FileConfig::load(&source.join(CONFIG_FILE_NAME))?;
        let config = Self {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            recursive,
            site_title: file.site_title,
            chapter_names: file.chapter_names,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        for key in self.chapter_names.keys() {
            if key.parse::<u32>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "chapter_names key '{key}' is not a chapter number"
                )));
            }
        }
        Ok(())
    }

    /// Root of the generated documentation tree.
    pub fn docs_root(&self) -> PathBuf {
        self.output.join("docs")
    }

    /// Root of the copied original files, segmented by type tag.
    pub fn static_root(&self) -> PathBuf {
        self.output.join("static")
    }

    /// The navigation artifact consumed by the site shell.
    pub fn sidebar_path(&self) -> PathBuf {
        self.output.join("sidebar.js")
    }
}

fn default_site_title() -> String {
    "MATLAB Program Documentation".to_string()
}

/// The `matbook.toml` subset of the configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    site_title: String,
    chapter_names: BTreeMap<String, String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            chapter_names: BTreeMap::new(),
        }
    }
}

impl FileConfig {
    /// Read the config file, falling back to defaults when absent.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = GenConfig::load(tmp.path(), Path::new("out"), false).unwrap();

        assert_eq!(config.site_title, "MATLAB Program Documentation");
        assert!(config.chapter_names.is_empty());
        assert!(!config.recursive);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "site_title = \"Numerical Methods\"\n\n[chapter_names]\n1 = \"Getting Started\"\n",
        )
        .unwrap();

        let config = GenConfig::load(tmp.path(), Path::new("out"), true).unwrap();

        assert_eq!(config.site_title, "Numerical Methods");
        assert_eq!(
            config.chapter_names.get("1").map(String::as_str),
            Some("Getting Started")
        );
        assert!(config.recursive);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "sitetitle = \"typo\"\n").unwrap();

        let result = GenConfig::load(tmp.path(), Path::new("out"), false);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_site_title_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "site_title = \"  \"\n").unwrap();

        let result = GenConfig::load(tmp.path(), Path::new("out"), false);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_numeric_chapter_key_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[chapter_names]\nintro = \"Nope\"\n",
        )
        .unwrap();

        let result = GenConfig::load(tmp.path(), Path::new("out"), false);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn output_roots_hang_off_the_output_dir() {
        let config = GenConfig {
            output: PathBuf::from("site"),
            ..GenConfig::default()
        };

        assert_eq!(config.docs_root(), PathBuf::from("site/docs"));
        assert_eq!(config.static_root(), PathBuf::from("site/static"));
        assert_eq!(config.sidebar_path(), PathBuf::from("site/sidebar.js"));
    }
}
