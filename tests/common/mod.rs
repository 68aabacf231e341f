use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp-file triple for one managed session
pub struct ManagedFiles {
    pub temp: TempDir,
    pub shell: PathBuf,
    pub hosts: PathBuf,
    pub notes: PathBuf,
}

impl ManagedFiles {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let shell = temp.path().join("bashrc");
        let hosts = temp.path().join("hosts");
        let notes = temp.path().join("notes.txt");
        ManagedFiles {
            temp,
            shell,
            hosts,
            notes,
        }
    }

    /// Command pointed at this triple via path-override flags
    pub fn cmd(&self) -> Command {
        let mut cmd = envman_cmd();
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("xdg"));
        cmd.arg("--shell-file").arg(&self.shell);
        cmd.arg("--hosts-file").arg(&self.hosts);
        cmd.arg("--notes-file").arg(&self.notes);
        cmd
    }
}

pub fn envman_cmd() -> Command {
    let mut cmd = Command::cargo_bin("envman").unwrap();
    cmd.env("SHELL", "/bin/bash");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Join interactive commands into a stdin script ending with quit
pub fn script(commands: &[&str]) -> String {
    let mut input = commands.join("\n");
    input.push_str("\nquit\n");
    input
}
