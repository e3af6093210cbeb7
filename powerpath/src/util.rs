//! Methods for reading files

use std::path;

use fs_err as fs;

use crate::{ApiError, StatusSnapshot};

/// Reads the snapshot document at `path`
///
/// `fs_err` puts the path into I/O error messages.
pub(crate) fn read_snapshot(path: &path::Path) -> Result<StatusSnapshot, ApiError> {
    let text = fs::read_to_string(path)?;
    Ok(StatusSnapshot::from_json_str(&text)?)
}
