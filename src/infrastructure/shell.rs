//! Shell family detection
//!
//! The export block lives in the startup file of the user's shell. The
//! family is read from `$SHELL`; only bash and zsh are supported, anything
//! else aborts startup.

use crate::error::{EnvmanError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOSTS_PATH: &str = "/etc/hosts";
pub const DEFAULT_NOTES_FILENAME: &str = "envman_notes.txt";

/// Supported shell families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFamily {
    Bash,
    Zsh,
}

impl ShellFamily {
    /// Detect the family from the `$SHELL` environment variable.
    pub fn detect() -> Result<Self> {
        let shell = std::env::var("SHELL").map_err(|_| EnvmanError::ShellNotDetected)?;
        Self::from_shell_path(&shell)
    }

    /// Classify an interpreter path by its basename.
    pub fn from_shell_path(shell: &str) -> Result<Self> {
        let name = Path::new(shell)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();

        if name.contains("bash") {
            Ok(ShellFamily::Bash)
        } else if name.contains("zsh") {
            Ok(ShellFamily::Zsh)
        } else {
            Err(EnvmanError::UnsupportedShell(name))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellFamily::Bash => "bash",
            ShellFamily::Zsh => "zsh",
        }
    }

    /// The startup file this family sources on new interactive shells.
    pub fn rc_file(&self) -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(self.rc_filename())
    }

    /// Conceptual display alias for the startup file
    pub fn rc_alias(&self) -> &'static str {
        match self {
            ShellFamily::Bash => "~/.bashrc",
            ShellFamily::Zsh => "~/.zshrc",
        }
    }

    fn rc_filename(&self) -> &'static str {
        match self {
            ShellFamily::Bash => ".bashrc",
            ShellFamily::Zsh => ".zshrc",
        }
    }
}

/// Default location of the personal notes file
pub fn default_notes_file() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(DEFAULT_NOTES_FILENAME)
}
