//! Interactive command loop
//!
//! Attended sessions get a rustyline editor with persisted history; piped
//! input falls back to plain stdin line reading so the tool stays
//! scriptable. Either way the loop terminates only on quit/exit or
//! end-of-input.

use crate::application::session::Session;
use crate::cli::output;
use crate::domain::command::{self, Command};
use crate::domain::entry::EntryKind;
use crate::error::Result;
use crate::infrastructure::shell::ShellFamily;
use colored::Colorize;
use console::Term;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use std::path::PathBuf;

enum ReadEvent {
    Line(String),
    Interrupted,
    Eof,
}

enum LineReader {
    Interactive {
        editor: DefaultEditor,
        history: Option<PathBuf>,
    },
    Piped(io::Lines<io::StdinLock<'static>>),
}

impl LineReader {
    fn new() -> Result<Self> {
        if console::user_attended() {
            let mut editor = DefaultEditor::new()?;
            let history = dirs::cache_dir().map(|dir| dir.join("envman").join("history.txt"));
            if let Some(path) = &history {
                let _ = editor.load_history(path);
            }
            Ok(LineReader::Interactive { editor, history })
        } else {
            Ok(LineReader::Piped(io::stdin().lines()))
        }
    }

    fn read(&mut self, prompt: &str) -> ReadEvent {
        match self {
            LineReader::Interactive { editor, .. } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    ReadEvent::Line(line)
                }
                Err(ReadlineError::Interrupted) => ReadEvent::Interrupted,
                Err(_) => ReadEvent::Eof,
            },
            LineReader::Piped(lines) => match lines.next() {
                Some(Ok(line)) => ReadEvent::Line(line),
                _ => ReadEvent::Eof,
            },
        }
    }

    fn save_history(&mut self) {
        if let LineReader::Interactive {
            editor,
            history: Some(path),
        } = self
        {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = editor.save_history(path);
        }
    }
}

/// Run the interactive loop until quit/exit or end-of-input.
pub fn run(mut session: Session, family: ShellFamily) -> Result<()> {
    let mut reader = LineReader::new()?;
    let user = std::env::var("USER").unwrap_or_else(|_| "user".to_string());
    let prompt = format!("{}@{} >> ", user, family.name());

    loop {
        match reader.read(&prompt) {
            ReadEvent::Eof => {
                println!("\n{}", "Exiting program.".yellow());
                break;
            }
            ReadEvent::Interrupted => {
                println!("{}", "Interrupted. Use 'quit' or Ctrl-D to exit.".yellow());
            }
            ReadEvent::Line(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match command::parse(input) {
                    Err(parse_err) => println!("{}", parse_err.to_string().yellow()),
                    Ok(Command::Quit) => {
                        println!("{}", "Exiting program.".yellow());
                        break;
                    }
                    Ok(Command::Clear) => {
                        let _ = Term::stdout().clear_screen();
                        println!("Console cleared.");
                    }
                    Ok(cmd) => {
                        // Per-operation failures are reported and the loop
                        // continues; only startup failures are fatal.
                        if let Err(e) = dispatch(&mut session, cmd) {
                            println!("{}", e.to_string().red());
                        }
                    }
                }
            }
        }
    }

    reader.save_history();
    Ok(())
}

fn dispatch(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Export { name, value } => {
            let report = session.add_export(&name, &value)?;
            output::print_write_report(EntryKind::Export, &report);
            output::print_commit_reminder();
        }
        Command::AddHost {
            ip,
            domain,
            aliases,
        } => {
            let report = session.add_host(&ip, &domain, &aliases)?;
            output::print_write_report(EntryKind::Host, &report);
            output::print_commit_reminder();
        }
        Command::AddNote { text } => {
            session.add_note(&text)?;
            output::print_note_added(&session.targets.notes.alias);
        }
        Command::Print => {
            let view = session.listing()?;
            print!(
                "{}",
                output::format_listing(&view, |path| session.alias_for(path).to_string())
            );
        }
        Command::PrintNotes => {
            let notes = session.notes()?;
            print!(
                "{}",
                output::format_notes(&notes, &session.targets.notes.alias)
            );
        }
        Command::Delete { index } => {
            let report = session.delete_display_index(index)?;
            output::print_delete_report(&report);
        }
        Command::DeleteAllExports => {
            let removed = session.delete_all_exports()?;
            output::print_block_cleared(removed, &session.targets.exports.alias);
        }
        Command::DeleteAllHosts => {
            let removed = session.delete_all_hosts()?;
            output::print_block_cleared(removed, &session.targets.hosts.alias);
        }
        Command::Commit => {
            session.commit()?;
            output::print_commit_done(&session.targets.exports.path);
        }
        // Handled by the loop before dispatch
        Command::Clear | Command::Quit => {}
    }
    Ok(())
}
