use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a sync run. Missing markdown fields and unmatched
/// HTML anchors are not errors; they show up in the report instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid path settings: {0}")]
    Settings(#[from] config::ConfigError),
}
