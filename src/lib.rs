//! envman - Managed-block editor for shell configuration files
//!
//! Maintains sentinel-delimited blocks inside a shell startup file, the
//! system hosts file, and a personal notes file, so entries can be added,
//! listed, and deleted without disturbing any unrelated file content.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::EnvmanError;
