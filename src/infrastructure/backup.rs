//! One-time startup backup of the shell startup file

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_SUFFIX: &str = ".envman.bak";

/// Path of the backup file sitting next to the original
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` to its backup location unless the backup already exists.
/// Returns the backup path when a copy was made.
pub fn backup_once(path: &Path) -> Result<Option<PathBuf>> {
    let backup = backup_path(path);
    if !path.exists() || backup.exists() {
        return Ok(None);
    }
    fs::copy(path, &backup)?;
    Ok(Some(backup))
}
