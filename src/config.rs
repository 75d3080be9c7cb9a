//! Configuration management for sevlog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{MirrorSet, Severity};

/// Name of the config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "sevlog.toml";

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory holding every log file, created on demand (default: ./Logs)
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Most verbose severity printed to the console (default: warning)
    #[serde(default = "default_console_level")]
    pub console_level: Severity,

    /// Most verbose severity written to the default log (default: information)
    #[serde(default = "default_file_level")]
    pub file_level: Severity,

    /// Severities that also get their own log file
    #[serde(default)]
    pub mirrored: MirrorSet,

    /// Longest rendered line in bytes, newline included (default: 512)
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("Logs")
}

fn default_console_level() -> Severity {
    Severity::Warning
}

fn default_file_level() -> Severity {
    Severity::Information
}

fn default_max_line_length() -> usize {
    512
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            console_level: default_console_level(),
            file_level: default_file_level(),
            mirrored: MirrorSet::empty(),
            max_line_length: default_max_line_length(),
        }
    }
}

impl LoggerConfig {
    /// Config rooted at a specific log directory, other fields default
    pub fn with_log_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the first config file found, or defaults
    ///
    /// Looks at `./sevlog.toml`, then the user config directory.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }
        match user_config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Ensure the log directory exists
    pub fn ensure_log_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.log_dir).with_context(|| {
            format!("Failed to create log directory {}", self.log_dir.display())
        })
    }
}

/// Path of the per-user config file, if the platform has a config directory
pub fn user_config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sevlog").join("config.toml"))
}
