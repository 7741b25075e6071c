//! User configuration loaded from the per-user config file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_EXPORT_ROOT, DEFAULT_SHEBANG};
use crate::export::ExportOptions;

/// User settings, read from `~/.curlport/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where collection directories are created
    pub export_root: PathBuf,
    /// First line of every generated script
    pub shebang: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            export_root: PathBuf::from(DEFAULT_EXPORT_ROOT),
            shebang: String::from(DEFAULT_SHEBANG),
        }
    }
}

impl Config {
    /// Path of the per-user config file, if there is a home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the per-user config, falling back to defaults when absent
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load `path`; a missing file gives the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load(path)
    }

    /// Load `path`, which must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            shebang: self.shebang.clone(),
        }
    }
}
