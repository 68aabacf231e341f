//! Configuration management
//!
//! An optional TOML file can override the three target paths. The default
//! location is `<config dir>/envman/config.toml`; a missing default file
//! just means defaults, while an explicitly requested file must exist.

use crate::error::{EnvmanError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the shell startup file
    pub shell_file: Option<PathBuf>,
    /// Override for the hosts file
    pub hosts_file: Option<PathBuf>,
    /// Override for the notes file
    pub notes_file: Option<PathBuf>,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("envman").join("config.toml"))
    }

    /// Load configuration. With `path` set, the file must exist and parse;
    /// otherwise the default location is tried and a missing file yields
    /// the default (empty) config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => {
                let contents = fs::read_to_string(explicit).map_err(|e| {
                    EnvmanError::Config(format!(
                        "Cannot read config file {}: {}",
                        explicit.display(),
                        e
                    ))
                })?;
                Self::parse(&contents)
            }
            None => {
                let Some(default) = Self::default_path() else {
                    return Ok(Config::default());
                };
                match fs::read_to_string(&default) {
                    Ok(contents) => Self::parse(&contents),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
                    Err(e) => Err(EnvmanError::Io(e)),
                }
            }
        }
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
