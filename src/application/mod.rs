//! Application layer - Session state and command handling

pub mod session;

pub use session::{DeleteReport, Session, Targets, WriteReport};
