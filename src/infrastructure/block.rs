//! Managed block location and line-oriented file operations
//!
//! Every operation here is a complete read-modify-write cycle over one
//! file: read all lines, transform, rewrite. There are no partial or
//! streaming edits, which is what guarantees content outside the managed
//! block is never touched. There is also no cross-process locking; a
//! concurrent external edit between read and write is a lost update.
//!
//! Pattern matching is always applied to the trimmed line, while preserved
//! lines are written back with their original whitespace. Only newly
//! constructed lines get a fresh trailing newline.

use crate::domain::entry::{self, Entry, EntryKind};
use crate::domain::target::ManagedTarget;
use crate::error::{EnvmanError, Result};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

/// 1-based line numbers of the sentinel lines themselves; entries live
/// strictly between them. Invalidated by any write to the file, so callers
/// re-synchronize after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBounds {
    pub start: usize,
    pub end: usize,
}

/// Result of an insert-or-replace: how many old lines were removed, and
/// the end marker's 1-based position after the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub replaced: usize,
    pub end_line: usize,
}

/// A file held in memory as `\n`-separated lines, remembering whether the
/// content ended with a final newline so rewrites preserve it.
#[derive(Debug, Clone)]
struct FileText {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl FileText {
    fn read(path: &Path) -> std::io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    fn parse(content: &str) -> Self {
        if content.is_empty() {
            return FileText {
                lines: Vec::new(),
                trailing_newline: true,
            };
        }
        let trailing_newline = content.ends_with('\n');
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        if trailing_newline {
            lines.pop();
        }
        FileText {
            lines,
            trailing_newline,
        }
    }

    fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    fn write(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.render())
    }
}

/// Best-effort write-permission check, run before any mutation so the
/// operation is refused up front and no partial write occurs. An existing
/// file is probed by opening it for append (which writes nothing); for a
/// missing file the parent directory's permissions are consulted.
pub fn check_write_permission(path: &Path) -> Result<()> {
    if path.exists() {
        match OpenOptions::new().append(true).open(path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(EnvmanError::PermissionDenied(path.to_path_buf()))
            }
            Err(e) => Err(EnvmanError::Io(e)),
        }
    } else {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        match fs::metadata(parent) {
            Ok(meta) if meta.permissions().readonly() => {
                Err(EnvmanError::PermissionDenied(path.to_path_buf()))
            }
            Ok(_) => Ok(()),
            Err(_) => Err(EnvmanError::PermissionDenied(path.to_path_buf())),
        }
    }
}

/// Non-erroring form of [`check_write_permission`], used for the startup
/// sudo warning.
pub fn is_writable(path: &Path) -> bool {
    check_write_permission(path).is_ok()
}

/// Locate the target's sentinel pair, healing as needed, and return the
/// markers' 1-based line numbers.
///
/// A missing file is created containing exactly the two marker lines. A
/// missing marker is appended to the end of the existing file and persisted
/// immediately. When a marker appears more than once, the last occurrence
/// wins; this tolerates manual duplication rather than rejecting it.
pub fn sync_block(target: &ManagedTarget) -> Result<BlockBounds> {
    check_write_permission(&target.path)?;

    if !target.path.exists() {
        let content = format!("{}\n{}\n", target.start_marker, target.end_marker);
        fs::write(&target.path, content)?;
        return Ok(BlockBounds { start: 1, end: 2 });
    }

    let mut text = FileText::read(&target.path)?;

    let mut start = None;
    let mut end = None;
    for (idx, line) in text.lines.iter().enumerate() {
        let clean = line.trim();
        if clean == target.start_marker {
            start = Some(idx + 1);
        } else if clean == target.end_marker {
            end = Some(idx + 1);
        }
    }

    let mut appended = false;
    let start = start.unwrap_or_else(|| {
        // A separator blank line, unless the file's last line was already
        // unterminated.
        if text.trailing_newline {
            text.lines.push(String::new());
        }
        text.lines.push(target.start_marker.clone());
        appended = true;
        text.lines.len()
    });
    let end = end.unwrap_or_else(|| {
        text.lines.push(target.end_marker.clone());
        appended = true;
        text.lines.len()
    });

    if appended {
        text.trailing_newline = true;
        text.write(&target.path)?;
    }

    Ok(BlockBounds { start, end })
}

/// List, in file order, every line strictly between the bounds that matches
/// the target's entry kind. A missing file yields an empty listing.
pub fn list_entries(target: &ManagedTarget, bounds: BlockBounds) -> Result<Vec<Entry>> {
    let text = match FileText::read(&target.path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(EnvmanError::Io(e)),
    };

    let mut entries = Vec::new();
    for (idx, line) in text.lines.iter().enumerate() {
        let number = idx + 1;
        if number <= bounds.start || number >= bounds.end {
            continue;
        }
        let clean = line.trim();
        if target.kind.matches(clean) {
            entries.push(Entry {
                line: number,
                text: clean.to_string(),
                path: target.path.clone(),
                kind: target.kind,
            });
        }
    }
    Ok(entries)
}

/// Insert a new entry line immediately before the end marker, first
/// removing every line inside the caller-supplied bounds whose key matches
/// `key` (export: variable name equality; host: whole-word domain match).
///
/// The end marker is re-located by scanning the post-deletion lines; if it
/// has vanished the file is left unwritten and the caller's bounds stay
/// valid for the unchanged file.
pub fn insert_or_replace(
    target: &ManagedTarget,
    key: &str,
    new_line: &str,
    bounds: BlockBounds,
) -> Result<ReplaceOutcome> {
    check_write_permission(&target.path)?;

    let mut text = FileText::read(&target.path)?;

    let mut kept = Vec::with_capacity(text.lines.len() + 1);
    let mut replaced = 0;
    for (idx, line) in text.lines.iter().enumerate() {
        let number = idx + 1;
        if number > bounds.start && number < bounds.end && key_matches(target.kind, line.trim(), key)
        {
            replaced += 1;
            continue;
        }
        kept.push(line.clone());
    }

    let end_at = kept
        .iter()
        .position(|line| line.trim() == target.end_marker)
        .ok_or_else(|| EnvmanError::MarkerVanished {
            path: target.path.clone(),
            marker: target.end_marker.clone(),
        })?;

    kept.insert(end_at, new_line.trim().to_string());
    text.lines = kept;
    text.write(&target.path)?;

    Ok(ReplaceOutcome {
        replaced,
        end_line: end_at + 2,
    })
}

fn key_matches(kind: EntryKind, trimmed: &str, key: &str) -> bool {
    match kind {
        EntryKind::Export => entry::export_name(trimmed) == Some(key),
        EntryKind::Host => entry::host_line_names_domain(trimmed, key),
        // Notes have no key; they are only appended via insert_note.
        EntryKind::Note => false,
    }
}

/// Remove every line strictly between the target's markers, with no
/// pattern filter. The markers themselves are preserved. Returns the
/// number of lines removed.
pub fn delete_all_in_block(target: &ManagedTarget) -> Result<usize> {
    check_write_permission(&target.path)?;

    let text = FileText::read(&target.path)?;

    let mut kept = Vec::with_capacity(text.lines.len());
    let mut in_block = false;
    let mut removed = 0;
    for line in &text.lines {
        let clean = line.trim();
        if clean == target.start_marker {
            in_block = true;
            kept.push(line.clone());
            continue;
        }
        if clean == target.end_marker {
            in_block = false;
            kept.push(line.clone());
            continue;
        }
        if in_block {
            removed += 1;
            continue;
        }
        kept.push(line.clone());
    }

    let updated = FileText {
        lines: kept,
        trailing_newline: text.trailing_newline,
    };
    updated.write(&target.path)?;

    Ok(removed)
}

/// Remove exactly one physical line by its 1-based number and return its
/// trimmed content. There is no block-bounds check here; the caller is
/// responsible for resolving the number against a fresh listing.
pub fn delete_line(path: &Path, line: usize) -> Result<String> {
    check_write_permission(path)?;

    let mut text = FileText::read(path)?;
    if line == 0 || line > text.lines.len() {
        return Err(EnvmanError::LineOutOfRange {
            path: path.to_path_buf(),
            line,
        });
    }

    let removed = text.lines.remove(line - 1);
    text.write(path)?;

    Ok(removed.trim().to_string())
}

/// Insert `NOTE: <trimmed text>` immediately before the line currently at
/// `end_line`. The caller-supplied end line must be fresh; an index outside
/// the file's current bounds is an error. Returns the end marker's new
/// 1-based position.
pub fn insert_note(target: &ManagedTarget, content: &str, end_line: usize) -> Result<usize> {
    check_write_permission(&target.path)?;

    let mut text = FileText::read(&target.path)?;
    if end_line == 0 || end_line > text.lines.len() {
        return Err(EnvmanError::LineOutOfRange {
            path: target.path.clone(),
            line: end_line,
        });
    }

    text.lines
        .insert(end_line - 1, format!("NOTE: {}", content.trim()));
    text.write(&target.path)?;

    Ok(end_line + 1)
}
