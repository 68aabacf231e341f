//! Domain layer - Block entries, commands, and aggregation

pub mod aggregate;
pub mod command;
pub mod entry;
pub mod target;

pub use command::{Command, ParseError};
pub use entry::{Entry, EntryKind};
pub use target::ManagedTarget;
