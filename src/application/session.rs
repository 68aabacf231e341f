//! Session state and command handling
//!
//! A session owns the three managed targets and their current block
//! bounds. Bounds are invalidated by every write, so each mutating
//! handler re-synchronizes the touched file before returning; nothing
//! here is cached between commands beyond those bounds.

use crate::domain::aggregate;
use crate::domain::entry::Entry;
use crate::domain::target::ManagedTarget;
use crate::error::Result;
use crate::infrastructure::block::{self, BlockBounds};
use crate::infrastructure::config::Config;
use crate::infrastructure::shell::{self, ShellFamily};
use std::path::{Path, PathBuf};

/// The three files under management, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct Targets {
    pub exports: ManagedTarget,
    pub hosts: ManagedTarget,
    pub notes: ManagedTarget,
}

impl Targets {
    /// Resolve target paths: CLI flag beats config file beats detection
    /// and defaults. Overridden paths are displayed as given.
    pub fn resolve(
        family: ShellFamily,
        config: &Config,
        shell_override: Option<PathBuf>,
        hosts_override: Option<PathBuf>,
        notes_override: Option<PathBuf>,
    ) -> Self {
        let (shell_path, shell_alias) = match shell_override.or_else(|| config.shell_file.clone()) {
            Some(path) => {
                let alias = path.display().to_string();
                (path, alias)
            }
            None => (family.rc_file(), family.rc_alias().to_string()),
        };
        let (hosts_path, hosts_alias) = match hosts_override.or_else(|| config.hosts_file.clone()) {
            Some(path) => {
                let alias = path.display().to_string();
                (path, alias)
            }
            None => (
                PathBuf::from(shell::DEFAULT_HOSTS_PATH),
                shell::DEFAULT_HOSTS_PATH.to_string(),
            ),
        };
        let (notes_path, notes_alias) = match notes_override.or_else(|| config.notes_file.clone()) {
            Some(path) => {
                let alias = path.display().to_string();
                (path, alias)
            }
            None => (
                shell::default_notes_file(),
                format!("~/{}", shell::DEFAULT_NOTES_FILENAME),
            ),
        };

        Targets {
            exports: ManagedTarget::exports(shell_path, shell_alias),
            hosts: ManagedTarget::hosts(hosts_path, hosts_alias),
            notes: ManagedTarget::notes(notes_path, notes_alias),
        }
    }
}

/// Report of an insert-or-replace handled by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// The entry line as written to the file
    pub line: String,
    /// Key of the entry (variable name or domain)
    pub key: String,
    /// How many old instances were removed
    pub replaced: usize,
}

/// Report of a delete-by-display-number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub index: usize,
    pub text: String,
    pub alias: String,
}

/// Interactive session over the three managed blocks
pub struct Session {
    pub targets: Targets,
    export_bounds: BlockBounds,
    hosts_bounds: BlockBounds,
    notes_bounds: BlockBounds,
}

impl Session {
    /// Synchronize all three blocks and capture their initial bounds.
    /// Failure on any target is fatal to the whole session.
    pub fn initialize(targets: Targets) -> Result<Self> {
        let export_bounds = block::sync_block(&targets.exports)?;
        let hosts_bounds = block::sync_block(&targets.hosts)?;
        let notes_bounds = block::sync_block(&targets.notes)?;

        Ok(Session {
            targets,
            export_bounds,
            hosts_bounds,
            notes_bounds,
        })
    }

    /// Insert or replace an `export NAME=VALUE` entry keyed by name.
    pub fn add_export(&mut self, name: &str, value: &str) -> Result<WriteReport> {
        let line = format!("export {}={}", name, value);
        let outcome =
            block::insert_or_replace(&self.targets.exports, name, &line, self.export_bounds)?;
        self.export_bounds = block::sync_block(&self.targets.exports)?;

        Ok(WriteReport {
            line,
            key: name.to_string(),
            replaced: outcome.replaced,
        })
    }

    /// Insert or replace a host mapping keyed by whole-word domain match.
    pub fn add_host(&mut self, ip: &str, domain: &str, aliases: &[String]) -> Result<WriteReport> {
        let line = format!("{}\t{} {}", ip, domain, aliases.join(" "))
            .trim()
            .to_string();
        let outcome =
            block::insert_or_replace(&self.targets.hosts, domain, &line, self.hosts_bounds)?;
        self.hosts_bounds = block::sync_block(&self.targets.hosts)?;

        Ok(WriteReport {
            line,
            key: domain.to_string(),
            replaced: outcome.replaced,
        })
    }

    /// Append a note entry; persists instantly.
    pub fn add_note(&mut self, text: &str) -> Result<()> {
        block::insert_note(&self.targets.notes, text, self.notes_bounds.end)?;
        self.notes_bounds = block::sync_block(&self.targets.notes)?;
        Ok(())
    }

    /// Build the aggregated view: exports, then hosts, then notes.
    pub fn listing(&self) -> Result<Vec<Entry>> {
        let exports = block::list_entries(&self.targets.exports, self.export_bounds)?;
        let hosts = block::list_entries(&self.targets.hosts, self.hosts_bounds)?;
        let notes = block::list_entries(&self.targets.notes, self.notes_bounds)?;
        Ok(aggregate::aggregate(exports, hosts, notes))
    }

    /// List note entries only.
    pub fn notes(&self) -> Result<Vec<Entry>> {
        block::list_entries(&self.targets.notes, self.notes_bounds)
    }

    /// Delete one entry by its display number in a freshly rebuilt
    /// aggregated view, then re-synchronize the touched file.
    pub fn delete_display_index(&mut self, index: usize) -> Result<DeleteReport> {
        let view = self.listing()?;
        let entry = aggregate::resolve(&view, index)?.clone();

        let text = block::delete_line(&entry.path, entry.line)?;
        let alias = self.alias_for(&entry.path).to_string();
        self.resync_path(&entry.path)?;

        Ok(DeleteReport { index, text, alias })
    }

    /// Remove every line in the export block. Returns the removed count.
    pub fn delete_all_exports(&mut self) -> Result<usize> {
        let removed = block::delete_all_in_block(&self.targets.exports)?;
        self.export_bounds = block::sync_block(&self.targets.exports)?;
        Ok(removed)
    }

    /// Remove every line in the hosts block. Returns the removed count.
    pub fn delete_all_hosts(&mut self) -> Result<usize> {
        let removed = block::delete_all_in_block(&self.targets.hosts)?;
        self.hosts_bounds = block::sync_block(&self.targets.hosts)?;
        Ok(removed)
    }

    /// Re-synchronize all three blocks.
    pub fn commit(&mut self) -> Result<()> {
        self.export_bounds = block::sync_block(&self.targets.exports)?;
        self.hosts_bounds = block::sync_block(&self.targets.hosts)?;
        self.notes_bounds = block::sync_block(&self.targets.notes)?;
        Ok(())
    }

    /// Display alias for one of the managed paths
    pub fn alias_for(&self, path: &Path) -> &str {
        if path == self.targets.exports.path {
            &self.targets.exports.alias
        } else if path == self.targets.hosts.path {
            &self.targets.hosts.alias
        } else {
            &self.targets.notes.alias
        }
    }

    fn resync_path(&mut self, path: &Path) -> Result<()> {
        if path == self.targets.exports.path {
            self.export_bounds = block::sync_block(&self.targets.exports)?;
        } else if path == self.targets.hosts.path {
            self.hosts_bounds = block::sync_block(&self.targets.hosts)?;
        } else {
            self.notes_bounds = block::sync_block(&self.targets.notes)?;
        }
        Ok(())
    }
}
