//! Shell configuration.
//!
//! Read from `--config <path>` or `ROWSMITH_CONFIG`; without either the
//! defaults below apply.

use std::path::{Path, PathBuf};

use rowsmith_core::types::coerce::UnknownTypePolicy;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "ROWSMITH_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ShellConfig {
    /// JSON file backing the in-process database.
    pub data_file: PathBuf,
    /// Keep everything in memory and ignore `data_file`.
    pub in_memory: bool,
    pub coercion: CoercionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CoercionConfig {
    pub unknown_types: UnknownTypePolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./rowsmith.json"),
            in_memory: false,
            coercion: CoercionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ShellConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = match config_path_from_args().or_else(config_path_from_env) {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.in_memory && self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data_file",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log.level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
