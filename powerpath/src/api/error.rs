use std::io;

use thiserror::Error;

pub use crate::error::{CatalogError, ConfigError, RuleTableError, SnapshotParseError, WriteError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotParseError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
