//! Configuration handling for taskboard
//!
//! Limits are layered, later sources winning:
//! 1. built-in defaults
//! 2. `config.toml` (explicit `--config` path, or the platform config dir)
//! 3. environment variables (`PROJECT_MAX_COUNT`, `TASK_MAX_NAME_LEN`, ...),
//!    including those loaded from `.env`
//!
//! The resulting [`Config`] is read once at startup and never changes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Size limits for one kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityLimits {
    /// Maximum number of siblings of this kind
    pub max_count: usize,
    /// Maximum name length, in characters
    pub max_name_len: usize,
    /// Maximum description length, in characters
    pub max_description_len: usize,
}

/// Limits for projects and tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limits {
    pub project: EntityLimits,
    pub task: EntityLimits,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            project: EntityLimits {
                max_count: 10,
                max_name_len: 30,
                max_description_len: 150,
            },
            task: EntityLimits {
                max_count: 20,
                max_name_len: 30,
                max_description_len: 150,
            },
        }
    }
}

/// Display settings for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    /// Column at which descriptions are wrapped
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { width: 72 }
    }
}

/// Effective configuration for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub limits: Limits,
    pub display: DisplayConfig,
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    project: EntityLimitsFile,
    task: EntityLimitsFile,
    display: DisplayFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EntityLimitsFile {
    max_count: Option<usize>,
    max_name_len: Option<usize>,
    max_description_len: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisplayFile {
    width: Option<usize>,
}

impl EntityLimitsFile {
    fn apply_to(&self, limits: &mut EntityLimits) {
        if let Some(v) = self.max_count {
            limits.max_count = v;
        }
        if let Some(v) = self.max_name_len {
            limits.max_name_len = v;
        }
        if let Some(v) = self.max_description_len {
            limits.max_description_len = v;
        }
    }
}

type LimitField = fn(&mut Limits) -> &mut usize;

/// Environment keys and the limit each one overrides
const ENV_KEYS: [(&str, LimitField); 6] = [
    ("PROJECT_MAX_COUNT", |l| &mut l.project.max_count),
    ("PROJECT_MAX_NAME_LEN", |l| &mut l.project.max_name_len),
    ("PROJECT_MAX_DESCRIPTION_LEN", |l| &mut l.project.max_description_len),
    ("TASK_MAX_COUNT", |l| &mut l.task.max_count),
    ("TASK_MAX_NAME_LEN", |l| &mut l.task.max_name_len),
    ("TASK_MAX_DESCRIPTION_LEN", |l| &mut l.task.max_description_len),
];

impl Config {
    /// Loads configuration from the file layer and the process environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()).into());
                }
                config.apply_file(path)?;
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.is_file()) {
                    config.apply_file(&path)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskboard", "taskboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default location of `config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        self.apply_toml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Overlays the keys present in a TOML document
    pub fn apply_toml(&mut self, content: &str) -> Result<(), ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        file.project.apply_to(&mut self.limits.project);
        file.task.apply_to(&mut self.limits.task);
        if let Some(width) = file.display.width {
            self.display.width = width;
        }
        Ok(())
    }

    /// Overlays limits from environment-style variables.
    ///
    /// Values that are not non-negative integers are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, field) in ENV_KEYS {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<usize>() {
                Ok(value) => *field(&mut self.limits) = value,
                Err(_) => {
                    tracing::warn!(key, value = %raw, "ignoring non-numeric limit override");
                }
            }
        }
    }
}
