//! # Config Loader
//!
//! Loads `config.toml` from the shrun configuration directory, writing a
//! default file on first use so users have something to edit.

use crate::core::paths::{self, PathError};
use crate::models::RunnerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Failed to parse '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Loads the config at the default location.
pub fn load_config() -> Result<RunnerConfig, ConfigError> {
    let path = paths::get_config_file_path()?;
    load_config_from(&path)
}

/// Loads the config at `path`, creating it with defaults when missing.
pub fn load_config_from(path: &Path) -> Result<RunnerConfig, ConfigError> {
    if !path.exists() {
        let default_config = RunnerConfig::default();
        let toml_string = toml::to_string_pretty(&default_config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml_string)?;
        log::debug!("Default config written to '{}'", path.display());
        return Ok(default_config);
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// The shell program for the terminal, with `~` and env vars expanded.
pub fn shell_program(config: &RunnerConfig) -> Result<PathBuf, PathError> {
    paths::expand_path(&config.shell)
}
