//! Error types for envman

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the envman application
#[derive(Debug, Error)]
pub enum EnvmanError {
    #[error("Could not determine current shell ($SHELL is not set)")]
    ShellNotDetected,

    #[error("Unsupported shell: '{0}'. Only bash and zsh are supported")]
    UnsupportedShell(String),

    #[error("Permission denied: cannot write to {0}")]
    PermissionDenied(PathBuf),

    #[error("End marker '{marker}' disappeared from {path} during processing")]
    MarkerVanished { path: PathBuf, marker: String },

    #[error("Line {line} is out of range for {path}")]
    LineOutOfRange { path: PathBuf, line: usize },

    #[error("Invalid entry number: [{0}]. Use 'print' to see valid numbers")]
    DisplayIndexOutOfRange(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl EnvmanError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvmanError::ShellNotDetected => 2,
            EnvmanError::UnsupportedShell(_) => 2,
            EnvmanError::PermissionDenied(_) => 3,
            EnvmanError::MarkerVanished { .. } => 4,
            _ => 1,
        }
    }
}

/// Result type using EnvmanError
pub type Result<T> = std::result::Result<T, EnvmanError>;
