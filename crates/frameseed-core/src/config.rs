//! Configuration loading, from .frameseed/config.yaml

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default steps between progress messages (2^24).
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("progress interval must be a non-zero power of two, got {0}")]
    InvalidProgressInterval(u64),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameseedConfig {
    /// Seed search settings
    pub finder: FinderConfig,

    /// Logging settings (consumed by the CLI)
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Steps between progress messages
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            progress_interval: default_progress_interval(),
        }
    }
}

impl FinderConfig {
    pub fn with_progress_interval(progress_interval: u64) -> Self {
        Self { progress_interval }
    }

    /// The search masks the step count with `interval - 1`, so only powers of two work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_interval.is_power_of_two() {
            Ok(())
        } else {
            Err(ConfigError::InvalidProgressInterval(self.progress_interval))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `frameseed_core=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact formatter
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl FrameseedConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .finder
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root (looks for .frameseed/config.yaml)
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".frameseed/config.yaml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}
