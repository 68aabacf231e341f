//! Cross-file entry aggregation
//!
//! Listing and delete-by-number work over a single ordinally-numbered view
//! built from all three managed blocks. The view is ephemeral: it must be
//! rebuilt from fresh listings before every delete, because any mutation
//! shifts line numbers.

use crate::domain::entry::Entry;
use crate::error::{EnvmanError, Result};

/// Concatenate the per-block listings into one ordered view: exports first,
/// hosts second, notes third, each in file order.
pub fn aggregate(exports: Vec<Entry>, hosts: Vec<Entry>, notes: Vec<Entry>) -> Vec<Entry> {
    let mut view = exports;
    view.extend(hosts);
    view.extend(notes);
    view
}

/// Look up an entry by its 1-based display index.
pub fn resolve(view: &[Entry], display_index: usize) -> Result<&Entry> {
    if display_index == 0 || display_index > view.len() {
        return Err(EnvmanError::DisplayIndexOutOfRange(display_index));
    }
    Ok(&view[display_index - 1])
}
