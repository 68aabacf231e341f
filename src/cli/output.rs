//! Output formatting utilities

use crate::application::session::{DeleteReport, WriteReport};
use crate::domain::entry::{self, Entry, EntryKind};
use crate::domain::target::ManagedTarget;
use crate::error::EnvmanError;
use crate::infrastructure::shell::ShellFamily;
use colored::Colorize;
use std::path::Path;

/// Format the aggregated listing with 1-based display indices.
pub fn format_listing<F>(view: &[Entry], alias_for: F) -> String
where
    F: Fn(&Path) -> String,
{
    if view.is_empty() {
        return format!(
            "\n{}\n",
            "No entries found in any managed block.".yellow()
        );
    }

    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "--- All Managed Entries ---".bold()));
    for (i, entry) in view.iter().enumerate() {
        let label = match entry.kind {
            EntryKind::Export => entry.kind.label().cyan(),
            EntryKind::Host => entry.kind.label().blue(),
            EntryKind::Note => entry.kind.label().purple(),
        };
        output.push_str(&format!(
            "[{}][{}] ({} Line {}): {}\n",
            (i + 1).to_string().bold(),
            label,
            alias_for(&entry.path),
            entry.line,
            entry.text
        ));
    }
    output.push_str(&format!("{}\n\n", "---------------------------".bold()));
    output
}

/// Format the notes-only listing, `NOTE: ` prefixes stripped.
pub fn format_notes(notes: &[Entry], alias: &str) -> String {
    if notes.is_empty() {
        return format!(
            "\n{}\n",
            format!("No notes found in the {} block.", alias).yellow()
        );
    }

    let mut output = String::new();
    output.push_str(&format!("\n{}\n", format!("--- Notes from {} ---", alias).bold()));
    for (i, note) in notes.iter().enumerate() {
        output.push_str(&format!(
            "[{}]: {}\n",
            (i + 1).to_string().bold(),
            entry::note_content(&note.text)
        ));
    }
    output.push_str(&format!("{}\n\n", "------------------------------".bold()));
    output
}

pub fn print_banner(family: ShellFamily) {
    println!(
        "{}",
        format!(
            "\n--- Shell Configuration Manager Started ({} mode) ---",
            family.name().to_uppercase()
        )
        .blue()
        .bold()
    );
}

pub fn print_initializing(target: &ManagedTarget) {
    println!(
        "Initializing {} at {}...",
        target.alias.cyan(),
        target.path.display()
    );
}

pub fn print_command_reference() {
    println!("\n{}", "--- Command Reference ---".bold());
    println!(
        "Export Variable: {} (e.g. `export PROJECT_PATH=/data/web`)",
        "export NAME=VALUE".cyan().bold()
    );
    println!(
        "Add Host Entry: {} (e.g. `add host 192.168.1.1 mysite.local`)",
        "add host <ip> <domain> [subdomain]".cyan().bold()
    );
    println!(
        "Add Note: {} (saves instantly to file)",
        "add note <text>".cyan().bold()
    );
    println!(
        "Apply Changes: {} (required for exports and hosts, not for notes)",
        "commit".cyan().bold()
    );
    println!(
        "List Entries: {} | {} | Delete Entry: {}",
        "print".cyan().bold(),
        "print notes".cyan().bold(),
        "del <number>".cyan().bold()
    );
    println!(
        "Bulk Delete: {} (exports) | {} (hosts)",
        "del all".cyan().bold(),
        "del host all".cyan().bold()
    );
}

pub fn print_sudo_warning(hosts_alias: &str) {
    println!("{}", "=".repeat(60));
    println!(
        "{}",
        format!(
            "WARNING: You likely need sudo to modify the {} file.",
            hosts_alias
        )
        .yellow()
    );
    println!(
        "{}",
        "If commands fail with Permission denied, restart with sudo.".yellow()
    );
    println!("{}", "=".repeat(60));
}

pub fn print_backup_created(alias: &str, backup: &Path) {
    println!(
        "{}",
        format!(
            "Created one-time backup: {} copied to {}.",
            alias,
            backup.display()
        )
        .yellow()
    );
}

pub fn print_backup_failed(err: &EnvmanError) {
    println!(
        "{}",
        format!("WARNING: Could not create backup, proceeding without one. ({})", err).red()
    );
}

/// Report an insert-or-replace: which case occurred is only an observable
/// message, never a distinct return path.
pub fn print_write_report(kind: EntryKind, report: &WriteReport) {
    let subject = match kind {
        EntryKind::Export => "variable",
        EntryKind::Host => "host entry for",
        EntryKind::Note => "note",
    };
    if report.replaced > 0 {
        println!(
            "{}",
            format!(
                "Replaced/Updated {} '{}'. Deleted {} old instance(s).",
                subject, report.key, report.replaced
            )
            .green()
        );
    } else {
        println!(
            "{}",
            format!("Inserted new entry: '{}'", report.line).green()
        );
    }
}

pub fn print_note_added(alias: &str) {
    println!("{}", format!("Inserted new note to {}.", alias).green());
}

pub fn print_commit_reminder() {
    println!(
        "{}",
        format!("NOTE: Run {} to finalize.", "commit".cyan().bold()).yellow()
    );
}

pub fn print_commit_done(rc_path: &Path) {
    println!("{}", "Configuration files written.".green());
    println!(
        "{}",
        format!(
            "ACTION REQUIRED: To load the new variables into your current shell, run: source {}",
            rc_path.display()
        )
        .yellow()
    );
}

pub fn print_delete_report(report: &DeleteReport) {
    println!(
        "{}",
        format!(
            "Deleted entry [{}]: '{}' from {}",
            report.index, report.text, report.alias
        )
        .green()
    );
}

pub fn print_block_cleared(removed: usize, alias: &str) {
    println!(
        "{}",
        format!("Deleted {} entries from {} block.", removed, alias).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(line: usize, text: &str, kind: EntryKind) -> Entry {
        Entry {
            line,
            text: text.to_string(),
            path: PathBuf::from("/tmp/f"),
            kind,
        }
    }

    #[test]
    fn test_format_empty_listing() {
        let output = format_listing(&[], |_| "x".to_string());
        assert!(output.contains("No entries found"));
    }

    #[test]
    fn test_format_listing_numbers_and_aliases() {
        let view = vec![
            entry(2, "export A=1", EntryKind::Export),
            entry(4, "10.0.0.1\tone.example", EntryKind::Host),
        ];
        let output = format_listing(&view, |_| "~/.bashrc".to_string());

        assert!(output.contains("All Managed Entries"));
        assert!(output.contains("export A=1"));
        assert!(output.contains("~/.bashrc Line 2"));
        assert!(output.contains("10.0.0.1\tone.example"));
        assert!(output.contains("Line 4"));
    }

    #[test]
    fn test_format_notes_strips_prefix() {
        let notes = vec![entry(2, "NOTE: buy milk", EntryKind::Note)];
        let output = format_notes(&notes, "~/envman_notes.txt");

        assert!(output.contains("Notes from ~/envman_notes.txt"));
        assert!(output.contains("buy milk"));
        assert!(!output.contains("NOTE: buy milk"));
    }

    #[test]
    fn test_format_empty_notes() {
        let output = format_notes(&[], "notes");
        assert!(output.contains("No notes found"));
    }
}
