//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envman")]
#[command(about = "Managed-block editor for shell exports, host mappings, and notes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Shell startup file to manage (default: detected from $SHELL)
    #[arg(long, value_name = "PATH")]
    pub shell_file: Option<PathBuf>,

    /// Hosts file to manage (default: /etc/hosts)
    #[arg(long, value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// Notes file to manage (default: ~/envman_notes.txt)
    #[arg(long, value_name = "PATH")]
    pub notes_file: Option<PathBuf>,

    /// Config file (default: ~/.config/envman/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
