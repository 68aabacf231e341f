//! Entry classification and key extraction
//!
//! Each managed block holds one kind of entry. A line belongs to a kind
//! when its trimmed text matches the kind's pattern; everything else in
//! the block is preserved on rewrite but never listed.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Regex for recognizing export entries: `export NAME=VALUE`
fn export_entry_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^export\s+[a-zA-Z_][a-zA-Z0-9_]*=.*").unwrap())
}

/// Regex capturing the variable name and value of an export entry
fn export_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^export\s+([a-zA-Z_][a-zA-Z0-9_]*)=(.+)").unwrap())
}

/// Regex for recognizing host entries: a dotted quad followed by whitespace
fn host_entry_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\s+.*").unwrap())
}

/// Regex for recognizing note entries
fn note_entry_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^NOTE:.*").unwrap())
}

/// The kind of entry a managed block holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Export,
    Host,
    Note,
}

impl EntryKind {
    /// Check whether a trimmed line is an entry of this kind.
    ///
    /// Matching is purely textual; malformed lines are simply not entries.
    pub fn matches(&self, trimmed: &str) -> bool {
        match self {
            EntryKind::Export => export_entry_regex().is_match(trimmed),
            EntryKind::Host => host_entry_regex().is_match(trimmed),
            EntryKind::Note => note_entry_regex().is_match(trimmed),
        }
    }

    /// Short label used in the aggregated listing
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Export => "EXP",
            EntryKind::Host => "HST",
            EntryKind::Note => "NOTE",
        }
    }
}

/// A logical record inside a managed block.
///
/// Entries have no identity beyond their position in the file at the moment
/// they were read; they are recomputed on every listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-based line number in the source file
    pub line: usize,
    /// Trimmed line text
    pub text: String,
    /// File the entry was read from
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Extract the variable name from an export entry line.
pub fn export_name(trimmed: &str) -> Option<&str> {
    export_name_regex()
        .captures(trimmed)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Check whether a host entry line maps the given domain.
///
/// The domain must appear as a whole word somewhere after the IP, so
/// `mysite.local` does not match a line for `mysite.locals`, while a line
/// for `old-mysite.local` still matches (`-` is a word boundary).
pub fn host_line_names_domain(trimmed: &str, domain: &str) -> bool {
    let pattern = format!(
        r"^\d{{1,3}}\.\d{{1,3}}\.\d{{1,3}}\.\d{{1,3}}\s+.*?\b{}\b.*",
        regex::escape(domain)
    );
    // The escaped domain cannot invalidate the pattern.
    Regex::new(&pattern).unwrap().is_match(trimmed)
}

/// Strip the `NOTE: ` prefix from a note entry for display.
pub fn note_content(trimmed: &str) -> &str {
    trimmed
        .strip_prefix("NOTE: ")
        .or_else(|| trimmed.strip_prefix("NOTE:"))
        .unwrap_or(trimmed)
}
