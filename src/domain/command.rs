//! Command parsing
//!
//! The interactive loop hands every input line to [`parse`], which produces
//! a tagged [`Command`] in a single step. Keywords are case-insensitive;
//! `add host` arguments are tokenized with shell-style quoting rules.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

fn print_notes_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^print\s+notes$").unwrap())
}

fn del_all_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^del\s+all$").unwrap())
}

fn del_host_all_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^del\s+host\s+all$").unwrap())
}

fn del_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^del\s+(\d+)").unwrap())
}

fn add_note_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^add\s+note\s+(.+)").unwrap())
}

fn add_host_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^add\s+host\s+(.+)").unwrap())
}

fn export_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i:^export)\s+([a-zA-Z_][a-zA-Z0-9_]*)=(.+)").unwrap())
}

fn ip_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").unwrap())
}

fn domain_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap())
}

/// A parsed interactive command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Export { name: String, value: String },
    AddHost { ip: String, domain: String, aliases: Vec<String> },
    AddNote { text: String },
    Print,
    PrintNotes,
    Delete { index: usize },
    DeleteAllExports,
    DeleteAllHosts,
    Commit,
    Clear,
    Quit,
}

/// Rejection of a malformed input line. Reported to the user; the loop
/// continues and no file is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid IP address format: {0}")]
    InvalidIp(String),

    #[error("Invalid domain name format: {0}")]
    InvalidDomain(String),

    #[error("Unclosed quotes in arguments")]
    UnclosedQuote,

    #[error("Invalid 'add host' format. Usage: add host <ip> <domain> [subdomain...]")]
    AddHostUsage,

    #[error("Invalid 'add note' format. Usage: add note <text>")]
    AddNoteUsage,

    #[error("Invalid format for 'del'. Use 'del <number>'")]
    DelUsage,

    #[error("Invalid command. Use commit, print, export NAME=VALUE, add host, or del <number>")]
    Unknown,
}

/// Parse one trimmed input line into a command.
pub fn parse(input: &str) -> Result<Command, ParseError> {
    if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
        return Ok(Command::Quit);
    }
    if input.eq_ignore_ascii_case("clear") {
        return Ok(Command::Clear);
    }
    if input.eq_ignore_ascii_case("commit") {
        return Ok(Command::Commit);
    }
    if input.eq_ignore_ascii_case("print") {
        return Ok(Command::Print);
    }
    if print_notes_regex().is_match(input) {
        return Ok(Command::PrintNotes);
    }
    if del_all_regex().is_match(input) {
        return Ok(Command::DeleteAllExports);
    }
    if del_host_all_regex().is_match(input) {
        return Ok(Command::DeleteAllHosts);
    }
    if let Some(caps) = del_number_regex().captures(input) {
        let index = caps[1].parse::<usize>().map_err(|_| ParseError::DelUsage)?;
        return Ok(Command::Delete { index });
    }
    if let Some(caps) = add_note_regex().captures(input) {
        let text = caps[1].trim().to_string();
        if text.is_empty() {
            return Err(ParseError::AddNoteUsage);
        }
        return Ok(Command::AddNote { text });
    }
    if let Some(caps) = add_host_regex().captures(input) {
        return parse_add_host(&caps[1]);
    }
    if let Some(caps) = export_regex().captures(input) {
        return Ok(Command::Export {
            name: caps[1].to_string(),
            value: caps[2].to_string(),
        });
    }
    Err(ParseError::Unknown)
}

fn parse_add_host(args: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(args)?;
    if tokens.len() < 2 {
        return Err(ParseError::AddHostUsage);
    }

    let ip = tokens[0].clone();
    let domain = tokens[1].clone();
    let aliases = tokens[2..].to_vec();

    if !ip_regex().is_match(&ip) {
        return Err(ParseError::InvalidIp(ip));
    }
    if !domain_regex().is_match(&domain) {
        return Err(ParseError::InvalidDomain(domain));
    }

    Ok(Command::AddHost { ip, domain, aliases })
}

/// Split a string on whitespace with shell-style quoting: quoted substrings
/// keep embedded spaces, single quotes are literal, backslash escapes the
/// next character outside single quotes.
fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err(ParseError::UnclosedQuote),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(esc @ ('"' | '\\')) => current.push(esc),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(ParseError::UnclosedQuote),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err(ParseError::UnclosedQuote),
                    }
                }
            }
            '\\' => {
                in_token = true;
                match chars.next() {
                    Some(esc) => current.push(esc),
                    None => return Err(ParseError::UnclosedQuote),
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
