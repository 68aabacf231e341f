//! Integration tests for startup: shell detection, block creation, backup,
//! and config/flag path resolution

use envman::domain::target::{EXPORT_END, EXPORT_START, HOSTS_END, HOSTS_START, NOTES_END, NOTES_START};
use predicates::prelude::*;
use std::fs;

mod common;
use common::{envman_cmd, ManagedFiles};

#[test]
fn test_startup_creates_all_three_files_with_marker_pairs() {
    let files = ManagedFiles::new();

    files.cmd().write_stdin("quit\n").assert().success();

    let shell = fs::read_to_string(&files.shell).unwrap();
    assert_eq!(shell, format!("{}\n{}\n", EXPORT_START, EXPORT_END));

    let hosts = fs::read_to_string(&files.hosts).unwrap();
    assert_eq!(hosts, format!("{}\n{}\n", HOSTS_START, HOSTS_END));

    let notes = fs::read_to_string(&files.notes).unwrap();
    assert_eq!(notes, format!("{}\n{}\n", NOTES_START, NOTES_END));
}

#[test]
fn test_second_startup_leaves_files_untouched() {
    let files = ManagedFiles::new();

    files.cmd().write_stdin("quit\n").assert().success();
    let before = fs::read_to_string(&files.shell).unwrap();

    files.cmd().write_stdin("quit\n").assert().success();
    let after = fs::read_to_string(&files.shell).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_startup_appends_markers_to_existing_unmanaged_file() {
    let files = ManagedFiles::new();
    fs::write(&files.shell, "# hand-written rc\nalias ll='ls -l'\n").unwrap();

    files.cmd().write_stdin("quit\n").assert().success();

    let shell = fs::read_to_string(&files.shell).unwrap();
    assert!(shell.starts_with("# hand-written rc\nalias ll='ls -l'\n"));
    assert!(shell.contains(EXPORT_START));
    assert!(shell.contains(EXPORT_END));
}

#[test]
fn test_unsupported_shell_aborts_startup() {
    let files = ManagedFiles::new();

    files
        .cmd()
        .env("SHELL", "/usr/bin/fish")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fish"));

    // Nothing was touched
    assert!(!files.shell.exists());
}

#[test]
fn test_missing_shell_variable_aborts_startup() {
    let files = ManagedFiles::new();

    files
        .cmd()
        .env_remove("SHELL")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("$SHELL"));
}

#[test]
fn test_zsh_banner_mode() {
    let files = ManagedFiles::new();

    files
        .cmd()
        .env("SHELL", "/usr/bin/zsh")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ZSH mode"));
}

#[test]
fn test_backup_created_exactly_once() {
    let files = ManagedFiles::new();
    fs::write(&files.shell, "original rc content\n").unwrap();

    files.cmd().write_stdin("quit\n").assert().success();

    let backup = files.temp.path().join("bashrc.envman.bak");
    assert_eq!(
        fs::read_to_string(&backup).unwrap(),
        "original rc content\n"
    );

    // The rc now carries markers; a second run must not refresh the backup
    files.cmd().write_stdin("quit\n").assert().success();
    assert_eq!(
        fs::read_to_string(&backup).unwrap(),
        "original rc content\n"
    );
}

#[test]
fn test_config_file_supplies_target_paths() {
    let files = ManagedFiles::new();
    let config_path = files.temp.path().join("config.toml");
    let config_notes = files.temp.path().join("notes_from_config.txt");
    fs::write(
        &config_path,
        format!("notes_file = \"{}\"\n", config_notes.display()),
    )
    .unwrap();

    envman_cmd()
        .env("XDG_CONFIG_HOME", files.temp.path().join("xdg"))
        .arg("--config")
        .arg(&config_path)
        .arg("--shell-file")
        .arg(&files.shell)
        .arg("--hosts-file")
        .arg(&files.hosts)
        .write_stdin("quit\n")
        .assert()
        .success();

    assert!(config_notes.exists());
}

#[test]
fn test_flag_overrides_config_file() {
    let files = ManagedFiles::new();
    let config_path = files.temp.path().join("config.toml");
    let config_notes = files.temp.path().join("notes_from_config.txt");
    fs::write(
        &config_path,
        format!("notes_file = \"{}\"\n", config_notes.display()),
    )
    .unwrap();

    files
        .cmd()
        .arg("--config")
        .arg(&config_path)
        .write_stdin("quit\n")
        .assert()
        .success();

    assert!(files.notes.exists());
    assert!(!config_notes.exists());
}

#[test]
fn test_missing_config_flag_path_fails() {
    let files = ManagedFiles::new();

    files
        .cmd()
        .arg("--config")
        .arg(files.temp.path().join("absent.toml"))
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}
