//! Configuration management for disktemp
//!
//! Tool locations, the subprocess deadline, the smartctl exit-status policy
//! and output formatting can all be overridden from a TOML file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// disktemp configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External tool options
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Report output options
    #[serde(default)]
    pub output: OutputConfig,
}

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Block device lister
    #[serde(default = "default_lsblk")]
    pub lsblk: String,
    /// SMART diagnostics tool
    #[serde(default = "default_smartctl")]
    pub smartctl: String,
    /// lm-sensors reader
    #[serde(default = "default_sensors")]
    pub sensors: String,
    /// Per-invocation deadline in seconds (0 = no deadline)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// smartctl exit-status bits that abort the run. Other bits are only logged.
    #[serde(default = "default_smartctl_fatal_mask")]
    pub smartctl_fatal_mask: u8,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON reports
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Exit with status 1 after a fatal failure instead of 0
    #[serde(default)]
    pub exit_nonzero_on_error: bool,
}

// Default value functions
fn default_lsblk() -> String {
    "lsblk".to_string()
}

fn default_smartctl() -> String {
    "smartctl".to_string()
}

fn default_sensors() -> String {
    "sensors".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_smartctl_fatal_mask() -> u8 {
    // command line did not parse | device open failed
    0b0000_0011
}

fn default_true() -> bool {
    true
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            lsblk: default_lsblk(),
            smartctl: default_smartctl(),
            sensors: default_sensors(),
            timeout_secs: default_timeout_secs(),
            smartctl_fatal_mask: default_smartctl_fatal_mask(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
            exit_nonzero_on_error: false,
        }
    }
}

impl ToolsConfig {
    /// Subprocess deadline, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

impl Config {
    /// Get the default configuration directory
    ///
    /// Returns `~/.config/disktemp`.
    pub fn default_path() -> PathBuf {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".config"))
            .join("disktemp")
    }

    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_file = Self::default_path().join("config.toml");

        if !config_file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }
}
